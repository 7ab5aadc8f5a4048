use ordered_float::OrderedFloat;

use crate::core::{AxisValue, ClientSize, LabelBoundingBox, SidePaddings, TimeInterval};

use super::LabelTextStyle;

/// Per-pass layout accumulator.
///
/// Fields derived from the tick set are only ever cleared together, through
/// [`LayoutInfo::set_ticks`] and [`LayoutInfo::set_text_style`].
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutInfo {
    pub client_size: ClientSize,
    pub text_height: f64,
    pub required_axis_size: f64,
    pub axis_size: f64,
    pub include_modulo: usize,
    pub tick_step: Option<f64>,
    pub time_interval: Option<TimeInterval>,
    pub overflow_paddings: SidePaddings,
    ticks: Vec<AxisValue>,
    tick_texts: Vec<String>,
    text_widths: Vec<f64>,
    label_boxes: Vec<LabelBoundingBox>,
    max_label_box: Option<LabelBoundingBox>,
    max_text_width: Option<f64>,
    text_style: LabelTextStyle,
}

impl LayoutInfo {
    #[must_use]
    pub fn new(client_size: ClientSize, text_style: LabelTextStyle, text_height: f64) -> Self {
        Self {
            client_size,
            text_height,
            required_axis_size: 0.0,
            axis_size: 0.0,
            include_modulo: 1,
            tick_step: None,
            time_interval: None,
            overflow_paddings: SidePaddings::new(),
            ticks: Vec::new(),
            tick_texts: Vec::new(),
            text_widths: Vec::new(),
            label_boxes: Vec::new(),
            max_label_box: None,
            max_text_width: None,
            text_style,
        }
    }

    /// Replaces ticks and their texts, dropping everything measured from them.
    pub fn set_ticks(&mut self, ticks: Vec<AxisValue>, tick_texts: Vec<String>) {
        self.ticks = ticks;
        self.tick_texts = tick_texts;
        self.text_widths.clear();
        self.label_boxes.clear();
        self.max_label_box = None;
        self.max_text_width = None;
    }

    /// Changes label orientation, dropping geometry computed for the old one.
    pub fn set_text_style(&mut self, text_style: LabelTextStyle) {
        self.text_style = text_style;
        self.label_boxes.clear();
        self.max_label_box = None;
        self.max_text_width = None;
    }

    pub fn set_text_widths(&mut self, text_widths: Vec<f64>) {
        self.text_widths = text_widths;
    }

    /// Stores per-tick boxes; the widest label's box becomes the max box.
    pub fn set_label_boxes(&mut self, label_boxes: Vec<LabelBoundingBox>) {
        self.max_label_box = self.widest_text_index().and_then(|i| label_boxes.get(i).copied());
        self.label_boxes = label_boxes;
    }

    pub fn set_max_text_width(&mut self, max_text_width: Option<f64>) {
        self.max_text_width = max_text_width;
    }

    #[must_use]
    pub fn ticks(&self) -> &[AxisValue] {
        &self.ticks
    }

    #[must_use]
    pub fn tick_texts(&self) -> &[String] {
        &self.tick_texts
    }

    #[must_use]
    pub fn text_widths(&self) -> &[f64] {
        &self.text_widths
    }

    #[must_use]
    pub fn label_boxes(&self) -> &[LabelBoundingBox] {
        &self.label_boxes
    }

    #[must_use]
    pub fn max_label_box(&self) -> Option<&LabelBoundingBox> {
        self.max_label_box.as_ref()
    }

    #[must_use]
    pub fn max_text_width(&self) -> Option<f64> {
        self.max_text_width
    }

    #[must_use]
    pub fn text_style(&self) -> LabelTextStyle {
        self.text_style
    }

    #[must_use]
    pub fn widest_text_width(&self) -> f64 {
        self.widest_text_index()
            .and_then(|i| self.text_widths.get(i).copied())
            .unwrap_or(0.0)
    }

    fn widest_text_index(&self) -> Option<usize> {
        self.text_widths
            .iter()
            .enumerate()
            // `max_by_key` keeps the last maximum; the first widest label wins.
            .rev()
            .max_by_key(|(_, width)| OrderedFloat(**width))
            .map(|(index, _)| index)
    }
}
