use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Side of the plot area an axis is attached to.
///
/// `Center` is an axis drawn through the middle of the plot; it is laid out
/// like a vertical axis whose labels run to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum AxisAnchor {
    #[default]
    Bottom,
    Top,
    Left,
    Right,
    Center,
}

impl AxisAnchor {
    /// Top and bottom axes run horizontally.
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// The side labels protrude toward, away from the plot.
    #[must_use]
    pub fn label_side(self) -> Side {
        match self {
            Self::Bottom => Side::Bottom,
            Self::Top => Side::Top,
            Self::Left => Side::Left,
            Self::Right | Self::Center => Side::Right,
        }
    }

    /// Side where axis pixel positions start (position 0).
    #[must_use]
    pub fn begin_side(self) -> Side {
        if self.is_horizontal() {
            Side::Left
        } else {
            Side::Bottom
        }
    }

    #[must_use]
    pub fn end_side(self) -> Side {
        if self.is_horizontal() {
            Side::Right
        } else {
            Side::Top
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum TextBaseline {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// Available panel size handed to a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClientSize {
    pub width: f64,
    pub height: f64,
}

impl ClientSize {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }

    /// Length along the axis direction.
    #[must_use]
    pub fn along(self, anchor: AxisAnchor) -> f64 {
        if anchor.is_horizontal() {
            self.width
        } else {
            self.height
        }
    }

    /// Length orthogonal to the axis (the axis thickness direction).
    #[must_use]
    pub fn across(self, anchor: AxisAnchor) -> f64 {
        if anchor.is_horizontal() {
            self.height
        } else {
            self.width
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rotates around the origin, clockwise in a y-down frame.
    #[must_use]
    pub fn rotated(self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }
}

/// A value on an axis: a category key, a number, or a time in unix seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AxisValue {
    Key(String),
    Number(f64),
    Time(f64),
}

impl AxisValue {
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Key(_) => None,
            Self::Number(value) | Self::Time(value) => Some(*value),
        }
    }
}

/// Extra padding requested per side, in discovery order.
pub type SidePaddings = IndexMap<Side, f64>;
