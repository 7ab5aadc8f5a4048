use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{AxisValue, HiddenTickGroup, TextMeasurer, group_hidden_ticks};

use super::{AxisLayoutEngine, LayoutInfo};

/// Custom tooltip text; when installed every tick gets a tooltip.
pub type TooltipFormatterFn = Arc<dyn Fn(&TickScene) -> String + Send + Sync + 'static>;

const ELLIPSIS: &str = "...";

/// One tick as handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickScene {
    pub index: usize,
    pub key: String,
    /// Typed value: a number, a time, or a category key.
    pub value: AxisValue,
    /// Value as found in the domain, before typing.
    pub raw_value: AxisValue,
    pub text: String,
    /// `text`, trimmed with an ellipsis to the layout's max text width.
    pub display_text: String,
    pub is_hidden: bool,
    /// Distance from the axis begin side.
    pub position_px: f64,
    pub tooltip: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinorTickScene {
    pub value: f64,
    pub position_px: f64,
}

/// Per-tick data the layout pass knows besides what `LayoutInfo` holds.
#[derive(Debug, Clone, Default)]
pub(super) struct TickSceneSource {
    pub(super) keys: Vec<String>,
    pub(super) raw_values: Vec<AxisValue>,
    pub(super) positions: Vec<f64>,
}

impl<M: TextMeasurer> AxisLayoutEngine<M> {
    pub(super) fn build_tick_scenes(
        &self,
        info: &LayoutInfo,
        source: &TickSceneSource,
    ) -> (Vec<TickScene>, Vec<HiddenTickGroup>) {
        let modulo = info.include_modulo.max(1);
        let max_text_width = info.max_text_width();
        let tooltip_enabled = self.config.tooltip_enabled;

        let mut ticks = Vec::with_capacity(info.ticks().len());
        for (index, (value, text)) in info.ticks().iter().zip(info.tick_texts()).enumerate() {
            let width = info.text_widths().get(index).copied().unwrap_or(0.0);
            let display_text = match max_text_width {
                Some(limit) if width > limit => self.trim_text_to_width(text, limit),
                _ => text.clone(),
            };
            let is_trimmed = display_text != *text;
            let mut tick = TickScene {
                index,
                key: source.keys.get(index).cloned().unwrap_or_else(|| text.clone()),
                value: value.clone(),
                raw_value: source
                    .raw_values
                    .get(index)
                    .cloned()
                    .unwrap_or_else(|| value.clone()),
                text: text.clone(),
                display_text,
                is_hidden: index % modulo != 0,
                position_px: source.positions.get(index).copied().unwrap_or(0.0),
                tooltip: None,
            };
            tick.tooltip = match &self.tooltip_formatter {
                Some(formatter) => Some(formatter(&tick)),
                None if tooltip_enabled && is_trimmed => Some(tick.text.clone()),
                None => None,
            };
            ticks.push(tick);
        }

        let mut hidden_groups = group_hidden_ticks(
            ticks
                .iter()
                .map(|tick| (tick.index, tick.key.as_str(), tick.text.as_str(), tick.is_hidden)),
        );
        if tooltip_enabled {
            for group in &mut hidden_groups {
                group.tooltip = Some(group.label.clone());
            }
        }
        (ticks, hidden_groups)
    }

    /// Longest prefix of `text` that fits `max_width` with an ellipsis appended.
    pub(super) fn trim_text_to_width(&self, text: &str, max_width: f64) -> String {
        let font = &self.config.font;
        let ellipsis_width = self.measurer.measure_width(ELLIPSIS, font);
        for (end, _) in text.char_indices().rev() {
            let prefix = &text[..end];
            if self.measurer.measure_width(prefix, font) + ellipsis_width <= max_width {
                return format!("{prefix}{ELLIPSIS}");
            }
        }
        ELLIPSIS.to_owned()
    }
}
