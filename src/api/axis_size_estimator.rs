use crate::core::{AxisAnchor, LabelBoundingBox, Side, SidePaddings, extent_toward};

/// Protrusions at or below this many pixels are ignored.
const OVERFLOW_TOLERANCE_PX: f64 = 1.0;
/// Discrete axes ask for a little more than they overflow by.
const DISCRETE_PADDING_INFLATION: f64 = 1.05;

/// Axis thickness needed by the largest label and the tick marks.
#[must_use]
pub fn estimate_required_size(
    max_label_box: Option<&LabelBoundingBox>,
    tick_length: f64,
    anchor: AxisAnchor,
) -> f64 {
    let Some(label_box) = max_label_box else {
        return sanitized_tick_length(tick_length);
    };
    extent_toward(label_box, anchor.label_side())
        + tick_slack(tick_length, label_box.source_angle, anchor)
}

/// Axis thickness reserved beside the labels: one tick length, plus a
/// second one for rotated labels or vertical axes.
#[must_use]
pub(super) fn tick_slack(tick_length: f64, label_angle: f64, anchor: AxisAnchor) -> f64 {
    let tick_length = sanitized_tick_length(tick_length);
    if label_angle != 0.0 || !anchor.is_horizontal() {
        2.0 * tick_length
    } else {
        tick_length
    }
}

fn sanitized_tick_length(tick_length: f64) -> f64 {
    if tick_length.is_finite() { tick_length.max(0.0) } else { 0.0 }
}

/// Label overflow past either end of the axis.
#[derive(Debug, Clone, Copy)]
pub struct OverflowInput<'a> {
    pub label_boxes: &'a [LabelBoundingBox],
    /// Tick positions measured from the axis begin side.
    pub positions: &'a [f64],
    pub client_length: f64,
    pub anchor: AxisAnchor,
    pub reserved_paddings: &'a SidePaddings,
    pub is_discrete: bool,
}

/// Per-side padding needed so that no label is clipped; empty when none is.
#[must_use]
pub fn compute_overflow_paddings(input: &OverflowInput<'_>) -> SidePaddings {
    let mut paddings = SidePaddings::new();
    let begin = input.anchor.begin_side();
    let end = input.anchor.end_side();
    // The label box frame is y-down while vertical positions grow upwards.
    let (begin_toward, end_toward) = if input.anchor.is_horizontal() {
        (Side::Left, Side::Right)
    } else {
        (Side::Bottom, Side::Top)
    };

    for (label_box, position) in input.label_boxes.iter().zip(input.positions) {
        let begin_protrusion = extent_toward(label_box, begin_toward);
        if begin_protrusion > OVERFLOW_TOLERANCE_PX {
            record_overflow(&mut paddings, input, begin, begin_protrusion - position);
        }
        let end_protrusion = extent_toward(label_box, end_toward);
        if end_protrusion > OVERFLOW_TOLERANCE_PX {
            record_overflow(
                &mut paddings,
                input,
                end,
                position + end_protrusion - input.client_length,
            );
        }
    }
    paddings
}

fn record_overflow(paddings: &mut SidePaddings, input: &OverflowInput<'_>, side: Side, overflow: f64) {
    let reserved = input.reserved_paddings.get(&side).copied().unwrap_or(0.0);
    let mut overflow = overflow - reserved;
    if !overflow.is_finite() || overflow <= OVERFLOW_TOLERANCE_PX {
        return;
    }
    if input.is_discrete {
        overflow *= DISCRETE_PADDING_INFLATION;
    }
    let entry = paddings.entry(side).or_insert(0.0);
    *entry = entry.max(overflow);
}
