use serde::{Deserialize, Serialize};
use tracing::warn;

use super::time_ticks::TimeInterval;

/// Ordered multipliers of a "nice" step: `multiplier × 10^exponent`.
pub const NICE_MULTIPLIERS: [f64; 4] = [1.0, 2.0, 5.0, 10.0];

/// Hard cap on emitted ticks, whatever the requested precision.
pub const MAX_GENERATED_TICKS: usize = 10_000;

const STEP_EPSILON: f64 = 1e-9;

/// Direction in which a requested step precision hit the configured exponent bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExponentOverflow {
    /// The step would need an exponent finer than the minimum (too many ticks asked).
    Below,
    /// The step would need an exponent coarser than the maximum (too few ticks asked).
    Above,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExponentBounds {
    pub min: Option<i32>,
    pub max: Option<i32>,
}

impl ExponentBounds {
    #[must_use]
    pub fn new(min: Option<i32>, max: Option<i32>) -> Self {
        Self { min, max }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NiceStep {
    /// One of `1`, `2` or `5`; a `10` is normalized into the next exponent.
    pub multiplier: f64,
    pub exponent: i32,
    pub overflow: Option<ExponentOverflow>,
}

impl NiceStep {
    #[must_use]
    pub fn value(self) -> f64 {
        scaled_by_power_of_ten(self.multiplier, self.exponent)
    }

    /// Decimals needed to print every multiple of this step exactly.
    #[must_use]
    pub fn decimals(self) -> u32 {
        if self.exponent >= 0 {
            0
        } else {
            self.exponent.unsigned_abs()
        }
    }
}

/// Chooses the smallest nice step with `step >= span / desired_count`.
#[must_use]
pub fn nice_step(span: f64, desired_count: usize, bounds: ExponentBounds) -> Option<NiceStep> {
    if !span.is_finite() || span <= 0.0 {
        return None;
    }
    let raw = span / desired_count.max(1) as f64;
    if !raw.is_finite() || raw <= 0.0 {
        return None;
    }

    let mut exponent = raw.log10().floor() as i32;
    let base = scaled_by_power_of_ten(1.0, exponent);
    let mut multiplier = NICE_MULTIPLIERS
        .iter()
        .copied()
        .find(|multiplier| multiplier * base >= raw * (1.0 - STEP_EPSILON))
        .unwrap_or(10.0);
    if multiplier >= 10.0 {
        multiplier = 1.0;
        exponent += 1;
    }

    let mut overflow = None;
    if let Some(min) = bounds.min {
        if exponent < min {
            exponent = min;
            multiplier = 1.0;
            overflow = Some(ExponentOverflow::Below);
        }
    }
    if let Some(max) = bounds.max {
        if exponent > max {
            exponent = max;
            multiplier = 1.0;
            overflow = Some(ExponentOverflow::Above);
        }
    }

    Some(NiceStep {
        multiplier,
        exponent,
        overflow,
    })
}

/// Tick values of a continuous (numeric or time) domain.
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuousTicks {
    pub values: Vec<f64>,
    /// Distance between consecutive ticks; `None` for a lone tick.
    pub step: Option<f64>,
    pub exponent: i32,
    pub decimals: u32,
    pub overflow: Option<ExponentOverflow>,
    /// Calendar unit of the step for time-series ticks.
    pub time_interval: Option<TimeInterval>,
}

impl ContinuousTicks {
    #[must_use]
    pub fn single(value: f64) -> Self {
        Self {
            values: vec![value],
            step: None,
            exponent: 0,
            decimals: 0,
            overflow: None,
            time_interval: None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Emits every multiple of the nice step inside `[min, max]`, or the
/// smallest run of multiples enclosing it when `enclose` is set.
#[must_use]
pub fn numeric_ticks(
    min: f64,
    max: f64,
    desired_count: usize,
    bounds: ExponentBounds,
    enclose: bool,
) -> ContinuousTicks {
    let (min, max) = if min <= max { (min, max) } else { (max, min) };
    let Some(step) = nice_step(max - min, desired_count, bounds) else {
        return ContinuousTicks::single(min);
    };

    let unit = step.value();
    let (first, last) = if enclose {
        (
            (min / unit + STEP_EPSILON).floor(),
            (max / unit - STEP_EPSILON).ceil(),
        )
    } else {
        (
            (min / unit - STEP_EPSILON).ceil(),
            (max / unit + STEP_EPSILON).floor(),
        )
    };

    let mut values = Vec::new();
    if first.is_finite() && last.is_finite() && last >= first {
        let count = capped_tick_count(first, last, "numeric");
        values.reserve(count);
        for offset in 0..count {
            let k = first + offset as f64;
            values.push(normalize_zero(scaled_by_power_of_ten(
                k * step.multiplier,
                step.exponent,
            )));
        }
    }

    ContinuousTicks {
        values,
        step: Some(unit),
        exponent: step.exponent,
        decimals: step.decimals(),
        overflow: step.overflow,
        time_interval: None,
    }
}

/// Number of step multiples in `first..=last`, capped at [`MAX_GENERATED_TICKS`].
///
/// The span is clamped before converting, so step counts past `usize::MAX`
/// cannot wrap.
pub(crate) fn capped_tick_count(first: f64, last: f64, generator: &str) -> usize {
    let span = last - first;
    let cap = (MAX_GENERATED_TICKS - 1) as f64;
    if span > cap {
        warn!(generator, span, "tick generation truncated");
        return MAX_GENERATED_TICKS;
    }
    span as usize + 1
}

/// `value × 10^exponent`, dividing for negative exponents so that decimal
/// steps such as `0.1` round the same way their literals do.
#[must_use]
pub(crate) fn scaled_by_power_of_ten(value: f64, exponent: i32) -> f64 {
    if exponent >= 0 {
        value * 10_f64.powi(exponent)
    } else {
        value / 10_f64.powi(-exponent)
    }
}

fn normalize_zero(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}
