use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::core::{
    AxisValue, CategoryItem, DomainKind, TimeInterval, TimeUnit, select_time_interval,
};

/// Custom tick label formatter; replaces every built-in format when installed.
pub type TickLabelFormatterFn =
    Arc<dyn Fn(&AxisValue, &TickFormatContext) -> String + Send + Sync + 'static>;

/// What a formatter knows about the tick set a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickFormatContext {
    pub kind: DomainKind,
    pub index: usize,
    pub step: Option<f64>,
    pub decimals: u32,
    pub time_interval: Option<TimeInterval>,
}

/// `rust_decimal` keeps at most 28 fractional digits.
const MAX_DECIMALS: u32 = 28;

/// Formats `value` with exactly `decimals` fractional digits.
#[must_use]
pub fn format_numeric_label(value: f64, decimals: u32) -> String {
    if !value.is_finite() {
        return "nan".to_owned();
    }
    let decimals = decimals.min(MAX_DECIMALS);
    if let Some(decimal) = Decimal::from_f64_retain(value) {
        let mut rounded =
            decimal.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(decimals);
        if rounded.is_zero() {
            rounded.set_sign_positive(true);
        }
        return rounded.to_string();
    }
    let precision = decimals as usize;
    format!("{value:.precision$}")
}

pub(super) fn time_label_pattern(unit: TimeUnit) -> &'static str {
    match unit {
        TimeUnit::Millisecond => "%H:%M:%S%.3f",
        TimeUnit::Second => "%H:%M:%S",
        TimeUnit::Minute | TimeUnit::Hour => "%H:%M",
        TimeUnit::Day | TimeUnit::Week => "%Y-%m-%d",
        TimeUnit::Month => "%Y-%m",
        TimeUnit::Year => "%Y",
    }
}

/// Formats unix seconds (UTC) with the detail the tick interval calls for.
#[must_use]
pub fn format_time_label(unix_seconds: f64, interval: Option<TimeInterval>) -> String {
    if !unix_seconds.is_finite() {
        return "nan".to_owned();
    }
    let unit = interval.map_or(TimeUnit::Day, |interval| interval.unit);
    let Some(date_time) = utc_from_unix_seconds(unix_seconds) else {
        return format_numeric_label(unix_seconds, 0);
    };
    date_time.format(time_label_pattern(unit)).to_string()
}

fn utc_from_unix_seconds(unix_seconds: f64) -> Option<DateTime<Utc>> {
    let seconds = unix_seconds.floor();
    let nanos = ((unix_seconds - seconds) * 1_000_000_000.0)
        .round()
        .clamp(0.0, 999_999_999.0) as u32;
    DateTime::<Utc>::from_timestamp(seconds as i64, nanos)
}

/// Interval used to format a discrete axis whose categories are all dates.
///
/// The step is the mean distance between categories. `None` when any
/// category is not date-typed.
pub(super) fn discrete_date_interval(items: &[CategoryItem]) -> Option<TimeInterval> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for item in items {
        let AxisValue::Time(seconds) = item.value else {
            return None;
        };
        min = min.min(seconds);
        max = max.max(seconds);
    }
    // One date, or equal dates, carry no interval; labels keep their text.
    if items.len() < 2 || max <= min {
        return None;
    }
    let step = (max - min) / (items.len() - 1) as f64;
    Some(
        select_time_interval(step, 1)
            .unwrap_or_else(|| TimeInterval::new(TimeUnit::Millisecond, 1)),
    )
}

#[cfg(test)]
mod tests {
    use super::{discrete_date_interval, format_numeric_label, format_time_label};
    use crate::core::{CategoryItem, TimeInterval, TimeUnit};

    #[test]
    fn numeric_labels_use_exact_decimals() {
        assert_eq!(format_numeric_label(0.1 + 0.2, 1), "0.3");
        assert_eq!(format_numeric_label(20.0, 0), "20");
        assert_eq!(format_numeric_label(0.0, 2), "0.00");
        assert_eq!(format_numeric_label(-0.001, 1), "0.0");
        assert_eq!(format_numeric_label(2.5, 0), "3");
        assert_eq!(format_numeric_label(f64::NAN, 1), "nan");
    }

    #[test]
    fn time_labels_follow_interval_unit() {
        // 2024-03-01T06:30:00Z
        let t = 1_709_274_600.0;
        assert_eq!(
            format_time_label(t, Some(TimeInterval::new(TimeUnit::Hour, 6))),
            "06:30"
        );
        assert_eq!(
            format_time_label(t, Some(TimeInterval::new(TimeUnit::Month, 1))),
            "2024-03"
        );
        assert_eq!(format_time_label(t, None), "2024-03-01");
    }

    #[test]
    fn date_categories_share_an_interval() {
        let items = vec![
            CategoryItem::date("a", 0.0),
            CategoryItem::date("b", 86_400.0),
            CategoryItem::date("c", 172_800.0),
        ];
        assert_eq!(
            discrete_date_interval(&items),
            Some(TimeInterval::new(TimeUnit::Day, 1))
        );
        let mixed = vec![CategoryItem::date("a", 0.0), CategoryItem::new("b")];
        assert_eq!(discrete_date_interval(&mixed), None);
    }

    #[test]
    fn single_or_equal_dates_have_no_interval() {
        assert_eq!(discrete_date_interval(&[CategoryItem::date("only", 86_400.0)]), None);
        let equal = vec![CategoryItem::date("a", 86_400.0), CategoryItem::date("b", 86_400.0)];
        assert_eq!(discrete_date_interval(&equal), None);
        assert_eq!(discrete_date_interval(&[]), None);
    }
}
