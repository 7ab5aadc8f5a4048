use tracing::debug;

use crate::core::{
    AxisAnchor, DomainKind, IncludeModuloInput, TextAlign, TextBaseline, TextMeasurer,
    compute_include_modulo, labels_collide,
};

use super::{AxisLayoutEngine, LabelTextStyle, LayoutInfo};

impl<M: TextMeasurer> AxisLayoutEngine<M> {
    /// Rotates colliding discrete labels when allowed, then derives the
    /// include modulo at the final angle.
    pub(super) fn resolve_discrete_overlap(&self, info: &mut LayoutInfo, band_step: f64) {
        let mode = self.config.overlap_mode;
        let anchor = self.config.anchor;
        let mut input = IncludeModuloInput {
            tick_count: info.ticks().len(),
            band_step,
            text_width: info.widest_text_width(),
            text_height: info.text_height,
            angle: info.text_style().angle,
            min_spacing_em: self.config.label_spacing_min_for(DomainKind::Discrete),
            space_width: self.measure_text_width("x"),
            is_horizontal: anchor.is_horizontal(),
        };

        let style = info.text_style();
        if mode.rotates() && !style.is_rotated() && labels_collide(&input) {
            let chosen = self
                .config
                .label_desired_angles
                .iter()
                .copied()
                .find(|angle| !labels_collide(&IncludeModuloInput { angle: *angle, ..input }))
                .or_else(|| self.config.label_desired_angles.last().copied());
            if let Some(angle) = chosen {
                debug!(angle, band_step, "rotating colliding discrete labels");
                input.angle = angle;
                info.set_text_style(rotated_text_style(anchor, angle, style.margin));
            }
        }

        info.include_modulo = compute_include_modulo(&input, mode);
    }
}

/// Rotated labels hang off their anchor point, reading away from the axis.
#[must_use]
pub fn rotated_text_style(anchor: AxisAnchor, angle: f64, margin: f64) -> LabelTextStyle {
    let (sin, cos) = angle.sin_cos();
    let (nx, ny) = outward_normal(anchor);
    let runs_outward = cos * nx + sin * ny >= 0.0;
    LabelTextStyle {
        angle,
        align: if runs_outward { TextAlign::Left } else { TextAlign::Right },
        baseline: TextBaseline::Middle,
        margin,
    }
}

/// Unit vector pointing from the axis line toward its labels, y-down.
pub(super) fn outward_normal(anchor: AxisAnchor) -> (f64, f64) {
    match anchor {
        AxisAnchor::Bottom => (0.0, 1.0),
        AxisAnchor::Top => (0.0, -1.0),
        AxisAnchor::Left => (-1.0, 0.0),
        AxisAnchor::Right | AxisAnchor::Center => (1.0, 0.0),
    }
}
