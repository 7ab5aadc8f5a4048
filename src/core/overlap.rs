//! "Include every Nth tick" thinning for discrete axes.

use serde::{Deserialize, Serialize};

/// What to do when discrete labels do not fit their bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum OverlapMode {
    /// Draw every label, overlapping or not.
    #[default]
    #[serde(alias = "normal")]
    Leave,
    /// Keep every Nth label.
    Hide,
    /// Rotate labels to one of the desired angles.
    Rotate,
    /// Rotate first, then keep every Nth label if they still collide.
    RotateThenHide,
}

impl OverlapMode {
    #[must_use]
    pub fn hides(self) -> bool {
        matches!(self, Self::Hide | Self::RotateThenHide)
    }

    #[must_use]
    pub fn rotates(self) -> bool {
        matches!(self, Self::Rotate | Self::RotateThenHide)
    }
}

/// Measured geometry the include modulo is derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncludeModuloInput {
    pub tick_count: usize,
    /// Pixel distance between consecutive bands.
    pub band_step: f64,
    pub text_width: f64,
    pub text_height: f64,
    /// Label rotation in radians.
    pub angle: f64,
    /// Minimum label gap, in ems of the text height.
    pub min_spacing_em: f64,
    /// Width of a single `x` in the label font.
    pub space_width: f64,
    pub is_horizontal: bool,
}

const TRIG_EPSILON: f64 = 1e-6;

/// Smallest stride that keeps labels apart, before any clamping.
///
/// Infinite when neither direction can separate labels.
#[must_use]
pub fn label_stride(input: &IncludeModuloInput) -> f64 {
    let b = input.band_step;
    let h = input.text_height;
    let w = input.text_width;
    if !(b > 0.0 && h > 0.0 && w > 0.0) {
        return 1.0;
    }

    let s_min_h = h * input.min_spacing_em.max(0.0);
    let s_min_w = input.space_width.max(0.0) + s_min_h;

    let (sin, cos) = input.angle.sin_cos();
    let (sin_or_cos, cos_or_sin) = if input.is_horizontal {
        (sin.abs(), cos.abs())
    } else {
        (cos.abs(), sin.abs())
    };

    let stride_baseline = if sin_or_cos < TRIG_EPSILON {
        f64::INFINITY
    } else {
        ((s_min_h + h) / (b * sin_or_cos)).ceil()
    };
    let stride_ortho = if cos_or_sin < TRIG_EPSILON {
        f64::INFINITY
    } else {
        ((s_min_w + w) / (b * cos_or_sin)).ceil()
    };
    stride_baseline.min(stride_ortho)
}

/// Whether adjacent labels would collide at the input's angle.
#[must_use]
pub fn labels_collide(input: &IncludeModuloInput) -> bool {
    let stride = label_stride(input);
    !stride.is_finite() || stride > 1.0
}

/// Keep-every-Nth modulo for a discrete axis; `1` keeps every label.
#[must_use]
pub fn compute_include_modulo(input: &IncludeModuloInput, mode: OverlapMode) -> usize {
    if !mode.hides() || input.tick_count <= 2 {
        return 1;
    }

    let stride = label_stride(input);
    if !stride.is_finite() || stride < 1.0 {
        return 1;
    }
    let modulo = stride as usize;
    if input.tick_count.div_ceil(modulo) < 2 {
        return 1;
    }
    modulo
}

/// A contiguous run of hidden ticks, standing in for them in the scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiddenTickGroup {
    /// Keys of the hidden ticks joined with `,`.
    pub key: String,
    /// Up to ten labels joined with `, `, followed by `...` when truncated.
    pub label: String,
    pub first_index: usize,
    pub last_index: usize,
    pub tick_count: usize,
    /// Hidden groups are placeholders: not selectable, not interactive.
    pub is_placeholder: bool,
    #[serde(default)]
    pub tooltip: Option<String>,
}

pub const HIDDEN_GROUP_LABEL_PREVIEW: usize = 10;

/// Collapses each run of consecutive hidden ticks into one group.
///
/// Input items are `(index, key, text, is_hidden)` in tick order.
#[must_use]
pub fn group_hidden_ticks<'a, I>(ticks: I) -> Vec<HiddenTickGroup>
where
    I: IntoIterator<Item = (usize, &'a str, &'a str, bool)>,
{
    let mut groups = Vec::new();
    let mut run: Vec<(usize, &str, &str)> = Vec::new();
    for (index, key, text, is_hidden) in ticks {
        if is_hidden {
            run.push((index, key, text));
        } else if !run.is_empty() {
            groups.push(hidden_group_from_run(&run));
            run.clear();
        }
    }
    if !run.is_empty() {
        groups.push(hidden_group_from_run(&run));
    }
    groups
}

fn hidden_group_from_run(run: &[(usize, &str, &str)]) -> HiddenTickGroup {
    let key = run
        .iter()
        .map(|(_, key, _)| *key)
        .collect::<Vec<_>>()
        .join(",");
    let mut label = run
        .iter()
        .take(HIDDEN_GROUP_LABEL_PREVIEW)
        .map(|(_, _, text)| *text)
        .collect::<Vec<_>>()
        .join(", ");
    if run.len() > HIDDEN_GROUP_LABEL_PREVIEW {
        label.push_str(", ...");
    }
    HiddenTickGroup {
        key,
        label,
        first_index: run.first().map_or(0, |(index, _, _)| *index),
        last_index: run.last().map_or(0, |(index, _, _)| *index),
        tick_count: run.len(),
        is_placeholder: true,
        tooltip: None,
    }
}
