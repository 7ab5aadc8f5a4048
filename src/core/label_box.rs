//! Oriented label bounding boxes.
//!
//! Boxes live in a frame anchored at the tick label point: x grows to the
//! right and y grows downwards, angles rotate clockwise in that frame.

use serde::{Deserialize, Serialize};

use super::types::{Point, Side, TextAlign, TextBaseline};

/// Axis-aligned extents of a (possibly rotated) label, relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelBoundingBox {
    pub x: f64,
    pub y: f64,
    pub x2: f64,
    pub y2: f64,
    pub source_angle: f64,
    pub source_text_width: f64,
    pub source_text_height: f64,
    pub source_align: TextAlign,
    pub source_baseline: TextBaseline,
    pub source_margin: f64,
    /// Rotated corners of the source rectangle: top-left, top-right,
    /// bottom-right, bottom-left (in text reading order).
    pub source_corners: [Point; 4],
}

impl LabelBoundingBox {
    #[must_use]
    pub fn width(&self) -> f64 {
        self.x2 - self.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.y2 - self.y
    }

    /// Unrotated top-left corner of the source rectangle.
    #[must_use]
    pub fn source_origin(&self) -> Point {
        source_origin(
            self.source_text_width,
            self.source_text_height,
            self.source_align,
            self.source_baseline,
            self.source_margin,
        )
    }
}

pub(crate) fn source_origin(
    text_width: f64,
    text_height: f64,
    align: TextAlign,
    baseline: TextBaseline,
    margin: f64,
) -> Point {
    let x = match align {
        TextAlign::Left => margin,
        TextAlign::Center => -text_width / 2.0,
        TextAlign::Right => -text_width - margin,
    };
    let y = match baseline {
        TextBaseline::Top => margin,
        TextBaseline::Middle => -text_height / 2.0,
        TextBaseline::Bottom => -text_height - margin,
    };
    Point::new(x, y)
}

/// Computes the box of a `text_width` x `text_height` label anchored by
/// `align`/`baseline`, pushed out by `margin` and rotated by `angle` radians.
#[must_use]
pub fn compute_label_box(
    text_width: f64,
    text_height: f64,
    align: TextAlign,
    baseline: TextBaseline,
    angle: f64,
    margin: f64,
) -> LabelBoundingBox {
    let text_width = sanitize_length(text_width);
    let text_height = sanitize_length(text_height);
    let margin = sanitize_length(margin);
    let angle = if angle.is_finite() { angle } else { 0.0 };

    let origin = source_origin(text_width, text_height, align, baseline, margin);
    let unrotated = [
        origin,
        Point::new(origin.x + text_width, origin.y),
        Point::new(origin.x + text_width, origin.y + text_height),
        Point::new(origin.x, origin.y + text_height),
    ];
    let corners = if angle == 0.0 {
        unrotated
    } else {
        unrotated.map(|corner| corner.rotated(angle))
    };

    let mut x = f64::INFINITY;
    let mut y = f64::INFINITY;
    let mut x2 = f64::NEG_INFINITY;
    let mut y2 = f64::NEG_INFINITY;
    for corner in corners {
        x = x.min(corner.x);
        y = y.min(corner.y);
        x2 = x2.max(corner.x);
        y2 = y2.max(corner.y);
    }

    LabelBoundingBox {
        x,
        y,
        x2,
        y2,
        source_angle: angle,
        source_text_width: text_width,
        source_text_height: text_height,
        source_align: align,
        source_baseline: baseline,
        source_margin: margin,
        source_corners: corners,
    }
}

/// How far the box protrudes past the anchor point toward `side`; never negative.
#[must_use]
pub fn extent_toward(label_box: &LabelBoundingBox, side: Side) -> f64 {
    let extent = match side {
        Side::Left => -label_box.x,
        Side::Right => label_box.x2,
        Side::Top => -label_box.y,
        Side::Bottom => label_box.y2,
    };
    if extent.is_finite() { extent.max(0.0) } else { 0.0 }
}

fn sanitize_length(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}
