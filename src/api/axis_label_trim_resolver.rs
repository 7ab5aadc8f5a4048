use crate::core::{AxisAnchor, TextAlign};
use crate::core::label_box::source_origin;

use super::LabelTextStyle;
use super::axis_discrete_overlap_resolver::outward_normal;

const SLOPE_EPSILON: f64 = 1e-9;

/// Largest text width whose label stays within `available_extent` of the
/// axis line, measured toward the label side.
///
/// The rotated label is cut by the line parallel to the axis at the
/// available extent. Text is removed from the end away from its anchored
/// edge; centered labels lose it from both ends. Returns `None` when the
/// label already fits or when trimming would not move its far edge.
#[must_use]
pub fn resolve_max_text_width(
    text_width: f64,
    text_height: f64,
    style: LabelTextStyle,
    anchor: AxisAnchor,
    available_extent: f64,
) -> Option<f64> {
    if !(text_width > 0.0) || !available_extent.is_finite() {
        return None;
    }
    let (sin, cos) = style.angle.sin_cos();
    let (nx, ny) = outward_normal(anchor);
    // Reading direction and line-advance direction, projected on the normal.
    let along = cos * nx + sin * ny;
    let across = -sin * nx + cos * ny;

    let origin = source_origin(text_width, text_height, style.align, style.baseline, style.margin);
    let fixed_extent = (origin.y * across).max((origin.y + text_height) * across);

    let (slope, offset) = match style.align {
        TextAlign::Left if along > SLOPE_EPSILON => (along, style.margin * along),
        TextAlign::Right if along < -SLOPE_EPSILON => {
            (along.abs(), style.margin * along.abs())
        }
        TextAlign::Center => (along.abs() / 2.0, 0.0),
        _ => return None,
    };
    if slope <= SLOPE_EPSILON {
        return None;
    }

    let width = ((available_extent.max(0.0) - fixed_extent - offset) / slope).clamp(0.0, text_width);
    (width < text_width).then_some(width)
}
