//! Calendar-aware tick generation for time-series domains (unix seconds, UTC).

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::nice_ticks::{
    ContinuousTicks, ExponentBounds, MAX_GENERATED_TICKS, capped_tick_count, nice_step,
    numeric_ticks,
};

pub const SECONDS_PER_MINUTE: f64 = 60.0;
pub const SECONDS_PER_HOUR: f64 = 3_600.0;
pub const SECONDS_PER_DAY: f64 = 86_400.0;
pub const SECONDS_PER_WEEK: f64 = 7.0 * SECONDS_PER_DAY;
pub const SECONDS_PER_MONTH: f64 = 30.436_875 * SECONDS_PER_DAY;
pub const SECONDS_PER_YEAR: f64 = 365.242_5 * SECONDS_PER_DAY;

/// 1970-01-05 was the first Monday after the epoch.
const FIRST_MONDAY_OFFSET_SECONDS: f64 = 4.0 * SECONDS_PER_DAY;
/// Finest sub-second precision: milliseconds.
const SUB_SECOND_EXPONENT_MIN: i32 = -3;
const STEP_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeUnit {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

/// A calendar step: `count` units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeInterval {
    pub unit: TimeUnit,
    pub count: u32,
}

impl TimeInterval {
    #[must_use]
    pub const fn new(unit: TimeUnit, count: u32) -> Self {
        Self { unit, count }
    }

    /// Nominal length in seconds (months and years use mean lengths).
    #[must_use]
    pub fn approx_seconds(self) -> f64 {
        let unit_seconds = match self.unit {
            TimeUnit::Millisecond => 0.001,
            TimeUnit::Second => 1.0,
            TimeUnit::Minute => SECONDS_PER_MINUTE,
            TimeUnit::Hour => SECONDS_PER_HOUR,
            TimeUnit::Day => SECONDS_PER_DAY,
            TimeUnit::Week => SECONDS_PER_WEEK,
            TimeUnit::Month => SECONDS_PER_MONTH,
            TimeUnit::Year => SECONDS_PER_YEAR,
        };
        unit_seconds * f64::from(self.count)
    }
}

const TIME_LADDER: [TimeInterval; 19] = [
    TimeInterval::new(TimeUnit::Second, 1),
    TimeInterval::new(TimeUnit::Second, 5),
    TimeInterval::new(TimeUnit::Second, 15),
    TimeInterval::new(TimeUnit::Second, 30),
    TimeInterval::new(TimeUnit::Minute, 1),
    TimeInterval::new(TimeUnit::Minute, 5),
    TimeInterval::new(TimeUnit::Minute, 15),
    TimeInterval::new(TimeUnit::Minute, 30),
    TimeInterval::new(TimeUnit::Hour, 1),
    TimeInterval::new(TimeUnit::Hour, 3),
    TimeInterval::new(TimeUnit::Hour, 6),
    TimeInterval::new(TimeUnit::Hour, 12),
    TimeInterval::new(TimeUnit::Day, 1),
    TimeInterval::new(TimeUnit::Day, 2),
    TimeInterval::new(TimeUnit::Week, 1),
    TimeInterval::new(TimeUnit::Month, 1),
    TimeInterval::new(TimeUnit::Month, 3),
    TimeInterval::new(TimeUnit::Month, 6),
    TimeInterval::new(TimeUnit::Year, 1),
];

/// Smallest calendar interval at least as long as `span / desired_count`.
///
/// Returns `None` when the target is below one second; those spans fall
/// back to decimal sub-second steps.
#[must_use]
pub fn select_time_interval(span: f64, desired_count: usize) -> Option<TimeInterval> {
    let target = span / desired_count.max(1) as f64;
    if !target.is_finite() || target < 1.0 {
        return None;
    }
    if let Some(interval) = TIME_LADDER
        .iter()
        .copied()
        .find(|interval| interval.approx_seconds() >= target * (1.0 - STEP_EPSILON))
    {
        return Some(interval);
    }

    let years = target / SECONDS_PER_YEAR;
    let step = nice_step(years, 1, ExponentBounds::new(Some(0), None))?;
    let count = step.value().round().clamp(1.0, f64::from(u32::MAX)) as u32;
    Some(TimeInterval::new(TimeUnit::Year, count))
}

/// Generates time ticks for `[min, max]` (unix seconds).
#[must_use]
pub fn time_ticks(min: f64, max: f64, desired_count: usize, enclose: bool) -> ContinuousTicks {
    let (min, max) = if min <= max { (min, max) } else { (max, min) };
    let span = max - min;
    if !span.is_finite() || span <= 0.0 {
        return ContinuousTicks::single(min);
    }

    let Some(interval) = select_time_interval(span, desired_count) else {
        let mut ticks = numeric_ticks(
            min,
            max,
            desired_count,
            ExponentBounds::new(Some(SUB_SECOND_EXPONENT_MIN), None),
            enclose,
        );
        let unit = if ticks.step.is_some_and(|step| step >= 1.0) {
            TimeUnit::Second
        } else {
            TimeUnit::Millisecond
        };
        let count = ticks
            .step
            .map(|step| {
                let per_unit = if unit == TimeUnit::Second { step } else { step * 1_000.0 };
                per_unit.round().max(1.0) as u32
            })
            .unwrap_or(1);
        ticks.time_interval = Some(TimeInterval::new(unit, count));
        return ticks;
    };

    let values = match interval.unit {
        TimeUnit::Month | TimeUnit::Year => calendar_ticks(min, max, interval, enclose),
        TimeUnit::Week => fixed_ticks(
            min,
            max,
            interval.approx_seconds(),
            FIRST_MONDAY_OFFSET_SECONDS,
            enclose,
        ),
        _ => fixed_ticks(min, max, interval.approx_seconds(), 0.0, enclose),
    };

    ContinuousTicks {
        values,
        step: Some(interval.approx_seconds()),
        exponent: 0,
        decimals: 0,
        overflow: None,
        time_interval: Some(interval),
    }
}

fn fixed_ticks(min: f64, max: f64, step: f64, offset: f64, enclose: bool) -> Vec<f64> {
    let (first, last) = if enclose {
        (
            ((min - offset) / step + STEP_EPSILON).floor(),
            ((max - offset) / step - STEP_EPSILON).ceil(),
        )
    } else {
        (
            ((min - offset) / step - STEP_EPSILON).ceil(),
            ((max - offset) / step + STEP_EPSILON).floor(),
        )
    };
    if !first.is_finite() || !last.is_finite() || last < first {
        return Vec::new();
    }
    let count = capped_tick_count(first, last, "time");
    (0..count)
        .map(|index| offset + (first + index as f64) * step)
        .collect()
}

/// Month and year ticks, aligned so that the month (or year) index is a
/// multiple of the interval count.
fn calendar_ticks(min: f64, max: f64, interval: TimeInterval, enclose: bool) -> Vec<f64> {
    let Some(start) = DateTime::<Utc>::from_timestamp(min.floor() as i64, 0) else {
        return Vec::new();
    };
    let months_per_step = match interval.unit {
        TimeUnit::Year => i64::from(interval.count) * 12,
        _ => i64::from(interval.count),
    };
    let start_month_index = i64::from(start.year()) * 12 + i64::from(start.month0());
    let mut month_index = start_month_index - start_month_index.rem_euclid(months_per_step);

    let mut values = Vec::new();
    let mut previous_below_min: Option<f64> = None;
    while values.len() < MAX_GENERATED_TICKS {
        let Some(seconds) = month_index_to_seconds(month_index) else {
            break;
        };
        if seconds < min - STEP_EPSILON {
            previous_below_min = Some(seconds);
        } else {
            if values.is_empty() && enclose {
                if let Some(below) = previous_below_min.take() {
                    if seconds > min + STEP_EPSILON {
                        values.push(below);
                    }
                }
            }
            if seconds > max + STEP_EPSILON {
                if enclose && values.last().is_none_or(|last| *last < max - STEP_EPSILON) {
                    values.push(seconds);
                }
                break;
            }
            values.push(seconds);
        }
        month_index += months_per_step;
    }
    values
}

fn month_index_to_seconds(month_index: i64) -> Option<f64> {
    let year = i32::try_from(month_index.div_euclid(12)).ok()?;
    let month = u32::try_from(month_index.rem_euclid(12)).ok()? + 1;
    let date = NaiveDate::from_ymd_opt(year, month, 1)?;
    let timestamp = date.and_hms_opt(0, 0, 0)?.and_utc().timestamp();
    Some(timestamp as f64)
}
