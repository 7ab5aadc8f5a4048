use crate::core::{
    AxisValue, CategoryItem, ContinuousTicks, DiscreteScale, DomainKind, TextMeasurer,
    TickCandidate, numeric_ticks, time_ticks,
};

use super::axis_label_format::{discrete_date_interval, format_numeric_label, format_time_label};
use super::{AxisLayoutEngine, DomainRoundMode, TickFormatContext};

/// Discrete ticks in display order with their texts.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct DiscreteTicks {
    pub(super) keys: Vec<String>,
    pub(super) values: Vec<AxisValue>,
    pub(super) texts: Vec<String>,
}

impl<M: TextMeasurer> AxisLayoutEngine<M> {
    /// Continuous ticks for `domain` at one desired count.
    pub(super) fn generate_continuous_ticks(
        &self,
        kind: DomainKind,
        domain: (f64, f64),
        desired_count: usize,
    ) -> ContinuousTicks {
        let enclose = self.config.domain_round_mode == DomainRoundMode::Tick;
        let (min, max) = domain;
        match kind {
            DomainKind::TimeSeries => time_ticks(min, max, desired_count, enclose),
            DomainKind::Numeric | DomainKind::Discrete => numeric_ticks(
                min,
                max,
                desired_count,
                self.config.exponent_bounds(),
                enclose,
            ),
        }
    }

    /// Generates, formats and measures the ticks for one desired count.
    pub(super) fn continuous_candidate(
        &self,
        kind: DomainKind,
        domain: (f64, f64),
        desired_count: usize,
    ) -> TickCandidate {
        let ticks = self.generate_continuous_ticks(kind, domain, desired_count);
        let texts: Vec<String> = ticks
            .values
            .iter()
            .enumerate()
            .map(|(index, value)| self.format_continuous_tick(kind, *value, index, &ticks))
            .collect();
        let max_text_width = texts
            .iter()
            .map(|text| self.measure_text_width(text))
            .fold(0.0, f64::max);
        TickCandidate {
            ticks,
            texts,
            max_text_width,
        }
    }

    pub(super) fn format_continuous_tick(
        &self,
        kind: DomainKind,
        value: f64,
        index: usize,
        ticks: &ContinuousTicks,
    ) -> String {
        let context = TickFormatContext {
            kind,
            index,
            step: ticks.step,
            decimals: ticks.decimals,
            time_interval: ticks.time_interval,
        };
        let value = continuous_value(kind, value);
        if let Some(formatter) = &self.tick_label_formatter {
            return formatter(&value, &context);
        }
        match value {
            AxisValue::Time(seconds) => format_time_label(seconds, context.time_interval),
            AxisValue::Number(number) => format_numeric_label(number, context.decimals),
            AxisValue::Key(key) => key,
        }
    }

    /// All categories in display order; discrete axes never negotiate a count.
    pub(super) fn generate_discrete_ticks(&self, scale: &DiscreteScale) -> DiscreteTicks {
        let mut items: Vec<&CategoryItem> = scale.ordered_items().collect();
        if self.config.reversed {
            items.reverse();
        }
        let date_interval = discrete_date_interval(scale.items());

        let mut ticks = DiscreteTicks {
            keys: Vec::with_capacity(items.len()),
            values: Vec::with_capacity(items.len()),
            texts: Vec::with_capacity(items.len()),
        };
        for (index, item) in items.into_iter().enumerate() {
            let text = if let Some(formatter) = &self.tick_label_formatter {
                let context = TickFormatContext {
                    kind: DomainKind::Discrete,
                    index,
                    step: None,
                    decimals: 0,
                    time_interval: date_interval,
                };
                formatter(&item.value, &context)
            } else {
                match (date_interval, &item.value) {
                    (Some(interval), AxisValue::Time(seconds)) => {
                        format_time_label(*seconds, Some(interval))
                    }
                    _ => item.label.clone(),
                }
            };
            ticks.keys.push(item.key.clone());
            ticks.values.push(item.value.clone());
            ticks.texts.push(text);
        }
        ticks
    }
}

pub(super) fn continuous_value(kind: DomainKind, value: f64) -> AxisValue {
    match kind {
        DomainKind::TimeSeries => AxisValue::Time(value),
        DomainKind::Numeric | DomainKind::Discrete => AxisValue::Number(value),
    }
}
