use std::cell::RefCell;

use crate::core::{TEXT_HEIGHT_RATIO, TextMeasurer};
use crate::error::AxisLayoutResult;

use super::label_cache::{LabelWidthCache, LabelWidthCacheStats};
use super::{AxisLayoutConfig, TickLabelFormatterFn, TooltipFormatterFn};

/// Lays out one axis at a time against a text measurement backend.
///
/// The engine holds options and installed formatters; every layout pass
/// starts from the scale and request it is handed, so passes are repeatable.
pub struct AxisLayoutEngine<M: TextMeasurer> {
    pub(super) measurer: M,
    pub(super) config: AxisLayoutConfig,
    pub(super) tick_label_formatter: Option<TickLabelFormatterFn>,
    pub(super) tooltip_formatter: Option<TooltipFormatterFn>,
    pub(super) label_width_cache: RefCell<LabelWidthCache>,
}

impl<M: TextMeasurer> AxisLayoutEngine<M> {
    pub fn new(measurer: M, config: AxisLayoutConfig) -> AxisLayoutResult<Self> {
        config.validate()?;
        Ok(Self {
            measurer,
            config,
            tick_label_formatter: None,
            tooltip_formatter: None,
            label_width_cache: RefCell::new(LabelWidthCache::default()),
        })
    }

    #[must_use]
    pub fn config(&self) -> &AxisLayoutConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: AxisLayoutConfig) -> AxisLayoutResult<()> {
        config.validate()?;
        if config.font != self.config.font {
            self.label_width_cache.borrow_mut().clear();
        }
        self.config = config;
        Ok(())
    }

    #[must_use]
    pub fn measurer(&self) -> &M {
        &self.measurer
    }

    pub fn set_tick_label_formatter(&mut self, formatter: TickLabelFormatterFn) {
        self.tick_label_formatter = Some(formatter);
    }

    pub fn clear_tick_label_formatter(&mut self) {
        self.tick_label_formatter = None;
    }

    pub fn set_tooltip_formatter(&mut self, formatter: TooltipFormatterFn) {
        self.tooltip_formatter = Some(formatter);
    }

    pub fn clear_tooltip_formatter(&mut self) {
        self.tooltip_formatter = None;
    }

    #[must_use]
    pub fn label_width_cache_stats(&self) -> LabelWidthCacheStats {
        self.label_width_cache.borrow().stats()
    }

    pub fn clear_label_width_cache(&self) {
        self.label_width_cache.borrow_mut().clear();
    }

    pub(super) fn measure_text_width(&self, text: &str) -> f64 {
        self.label_width_cache
            .borrow_mut()
            .measure(&self.measurer, text, &self.config.font)
    }

    /// Label box height: the glyph share of the measured font height.
    pub(super) fn text_height(&self) -> f64 {
        let height = self.measurer.font_height(&self.config.font) * TEXT_HEIGHT_RATIO;
        if height.is_finite() { height.max(0.0) } else { 0.0 }
    }
}
