use std::f64::consts::FRAC_PI_4;

use serde::{Deserialize, Serialize};

use crate::core::{
    AxisAnchor, DomainKind, ExponentBounds, Font, OverlapMode, TextAlign, TextBaseline,
};
use crate::error::{AxisLayoutError, AxisLayoutResult};

/// Label spacing of discrete axes, in ems, when none is configured.
pub const DISCRETE_LABEL_SPACING_EM: f64 = 0.25;
/// Label spacing of continuous axes, in ems, when none is configured.
pub const CONTINUOUS_LABEL_SPACING_EM: f64 = 1.5;

/// Whether continuous ticks stay inside the domain or enclose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum DomainRoundMode {
    #[default]
    None,
    /// Extend the domain to the first and last tick.
    Tick,
}

/// Label orientation and placement relative to the tick anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelTextStyle {
    /// Radians, clockwise.
    pub angle: f64,
    pub align: TextAlign,
    pub baseline: TextBaseline,
    pub margin: f64,
}

impl LabelTextStyle {
    #[must_use]
    pub fn is_rotated(self) -> bool {
        self.angle != 0.0
    }
}

/// Axis layout options with their defaults.
///
/// Unset label placement options fall back to orientation-aware defaults in
/// [`AxisLayoutConfig::resolve_text_style`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisLayoutConfig {
    pub anchor: AxisAnchor,
    pub font: Font,
    pub tick_length: f64,
    /// `None` draws ticks on continuous axes only.
    pub show_ticks: Option<bool>,
    pub show_minor_ticks: bool,
    /// Minimum gap between labels, in ems of the text height. `None` picks
    /// [`DISCRETE_LABEL_SPACING_EM`] or [`CONTINUOUS_LABEL_SPACING_EM`].
    pub label_spacing_min: Option<f64>,
    /// Skips the tick count search when set.
    pub desired_tick_count: Option<usize>,
    pub overlap_mode: OverlapMode,
    /// Angles tried, in order, when rotating colliding discrete labels.
    pub label_desired_angles: Vec<f64>,
    pub label_angle: Option<f64>,
    pub label_align: Option<TextAlign>,
    pub label_baseline: Option<TextBaseline>,
    pub label_margin: f64,
    pub tooltip_enabled: bool,
    pub number_exponent_min: Option<i32>,
    pub number_exponent_max: Option<i32>,
    pub domain_round_mode: DomainRoundMode,
    /// Runs ticks from the end side of the axis.
    pub reversed: bool,
}

impl Default for AxisLayoutConfig {
    fn default() -> Self {
        Self {
            anchor: AxisAnchor::default(),
            font: Font::default(),
            tick_length: 6.0,
            show_ticks: None,
            show_minor_ticks: true,
            label_spacing_min: None,
            desired_tick_count: None,
            overlap_mode: OverlapMode::default(),
            label_desired_angles: vec![FRAC_PI_4],
            label_angle: None,
            label_align: None,
            label_baseline: None,
            label_margin: 3.0,
            tooltip_enabled: false,
            number_exponent_min: None,
            number_exponent_max: None,
            domain_round_mode: DomainRoundMode::default(),
            reversed: false,
        }
    }
}

impl AxisLayoutConfig {
    #[must_use]
    pub fn with_anchor(mut self, anchor: AxisAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    #[must_use]
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    #[must_use]
    pub fn with_tick_length(mut self, tick_length: f64) -> Self {
        self.tick_length = tick_length;
        self
    }

    #[must_use]
    pub fn with_show_ticks(mut self, show_ticks: bool) -> Self {
        self.show_ticks = Some(show_ticks);
        self
    }

    #[must_use]
    pub fn with_show_minor_ticks(mut self, show_minor_ticks: bool) -> Self {
        self.show_minor_ticks = show_minor_ticks;
        self
    }

    #[must_use]
    pub fn with_label_spacing_min(mut self, em: f64) -> Self {
        self.label_spacing_min = Some(em);
        self
    }

    #[must_use]
    pub fn with_desired_tick_count(mut self, count: Option<usize>) -> Self {
        self.desired_tick_count = count;
        self
    }

    #[must_use]
    pub fn with_overlap_mode(mut self, mode: OverlapMode) -> Self {
        self.overlap_mode = mode;
        self
    }

    #[must_use]
    pub fn with_label_desired_angles(mut self, angles: Vec<f64>) -> Self {
        self.label_desired_angles = angles;
        self
    }

    #[must_use]
    pub fn with_label_angle(mut self, angle: Option<f64>) -> Self {
        self.label_angle = angle;
        self
    }

    #[must_use]
    pub fn with_label_align(mut self, align: Option<TextAlign>) -> Self {
        self.label_align = align;
        self
    }

    #[must_use]
    pub fn with_label_baseline(mut self, baseline: Option<TextBaseline>) -> Self {
        self.label_baseline = baseline;
        self
    }

    #[must_use]
    pub fn with_label_margin(mut self, margin: f64) -> Self {
        self.label_margin = margin;
        self
    }

    #[must_use]
    pub fn with_tooltip_enabled(mut self, enabled: bool) -> Self {
        self.tooltip_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_number_exponent_bounds(mut self, min: Option<i32>, max: Option<i32>) -> Self {
        self.number_exponent_min = min;
        self.number_exponent_max = max;
        self
    }

    #[must_use]
    pub fn with_domain_round_mode(mut self, mode: DomainRoundMode) -> Self {
        self.domain_round_mode = mode;
        self
    }

    #[must_use]
    pub fn with_reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    pub fn validate(&self) -> AxisLayoutResult<()> {
        let non_negative = |name: &str, value: f64| {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(AxisLayoutError::InvalidConfig(format!(
                    "{name} must be finite and >= 0"
                )))
            }
        };
        non_negative("tick_length", self.tick_length)?;
        if let Some(em) = self.label_spacing_min {
            non_negative("label_spacing_min", em)?;
        }
        non_negative("label_margin", self.label_margin)?;

        if !self.font.size_px.is_finite() || self.font.size_px <= 0.0 {
            return Err(AxisLayoutError::InvalidConfig(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        if self.desired_tick_count == Some(0) {
            return Err(AxisLayoutError::InvalidConfig(
                "desired_tick_count must be >= 1".to_owned(),
            ));
        }
        if self.label_angle.is_some_and(|angle| !angle.is_finite())
            || self.label_desired_angles.iter().any(|angle| !angle.is_finite())
        {
            return Err(AxisLayoutError::InvalidConfig(
                "label angles must be finite".to_owned(),
            ));
        }
        if let (Some(min), Some(max)) = (self.number_exponent_min, self.number_exponent_max) {
            if min > max {
                return Err(AxisLayoutError::InvalidConfig(format!(
                    "number_exponent_min ({min}) exceeds number_exponent_max ({max})"
                )));
            }
        }
        Ok(())
    }

    /// Tick length actually drawn on a `kind` axis; `0` when ticks are hidden.
    #[must_use]
    pub fn effective_tick_length(&self, kind: DomainKind) -> f64 {
        let show_ticks = self.show_ticks.unwrap_or(kind != DomainKind::Discrete);
        if show_ticks { self.tick_length } else { 0.0 }
    }

    #[must_use]
    pub fn label_spacing_min_for(&self, kind: DomainKind) -> f64 {
        self.label_spacing_min.unwrap_or(match kind {
            DomainKind::Discrete => DISCRETE_LABEL_SPACING_EM,
            DomainKind::Numeric | DomainKind::TimeSeries => CONTINUOUS_LABEL_SPACING_EM,
        })
    }

    #[must_use]
    pub fn exponent_bounds(&self) -> ExponentBounds {
        ExponentBounds::new(self.number_exponent_min, self.number_exponent_max)
    }

    /// Explicit label options over orientation defaults.
    #[must_use]
    pub fn resolve_text_style(&self) -> LabelTextStyle {
        let default_baseline = match self.anchor {
            AxisAnchor::Bottom => TextBaseline::Top,
            AxisAnchor::Top => TextBaseline::Bottom,
            AxisAnchor::Left | AxisAnchor::Right | AxisAnchor::Center => TextBaseline::Middle,
        };
        let default_align = match self.anchor {
            AxisAnchor::Top | AxisAnchor::Bottom => TextAlign::Center,
            AxisAnchor::Left => TextAlign::Right,
            AxisAnchor::Right | AxisAnchor::Center => TextAlign::Left,
        };
        LabelTextStyle {
            angle: self.label_angle.unwrap_or(0.0),
            align: self.label_align.unwrap_or(default_align),
            baseline: self.label_baseline.unwrap_or(default_baseline),
            margin: self.label_margin,
        }
    }
}
