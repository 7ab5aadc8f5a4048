use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    AxisAnchor, AxisScale, AxisValue, ClientSize, DomainKind, HiddenTickGroup, SidePaddings,
    TextMeasurer, TimeInterval, compute_label_box,
};
use crate::error::{AxisLayoutError, AxisLayoutResult};

use super::axis_label_trim_resolver::resolve_max_text_width;
use super::axis_size_estimator::{
    OverflowInput, compute_overflow_paddings, estimate_required_size, tick_slack,
};
use super::axis_tick_generator::continuous_value;
use super::axis_tick_scene_builder::TickSceneSource;
use super::{
    AxisLayoutEngine, DomainRoundMode, LabelTextStyle, LayoutInfo, MinorTickScene,
    TickCountSummary, TickScene,
};

/// Inputs of one layout pass besides the scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLayoutRequest {
    pub client_size: ClientSize,
    /// Axis thickness imposed by the caller; labels are trimmed to fit it.
    pub fixed_axis_size: Option<f64>,
    /// Padding already reserved around the plot, deducted from overflow.
    pub reserved_paddings: SidePaddings,
}

impl AxisLayoutRequest {
    #[must_use]
    pub fn new(client_size: ClientSize) -> Self {
        Self {
            client_size,
            fixed_axis_size: None,
            reserved_paddings: SidePaddings::new(),
        }
    }

    #[must_use]
    pub fn with_fixed_axis_size(mut self, size: Option<f64>) -> Self {
        self.fixed_axis_size = size;
        self
    }

    #[must_use]
    pub fn with_reserved_paddings(mut self, paddings: SidePaddings) -> Self {
        self.reserved_paddings = paddings;
        self
    }
}

/// Result of a layout pass: axis size and the tick scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLayout {
    pub anchor: AxisAnchor,
    pub axis_size: f64,
    pub required_axis_size: f64,
    pub ticks: Vec<TickScene>,
    pub hidden_groups: Vec<HiddenTickGroup>,
    pub minor_ticks: Vec<MinorTickScene>,
    /// Trim threshold for label texts; `None` when nothing is trimmed.
    pub max_text_width: Option<f64>,
    pub overflow_paddings: SidePaddings,
    pub include_modulo: usize,
    pub tick_step: Option<f64>,
    pub time_interval: Option<TimeInterval>,
    pub text_style: LabelTextStyle,
    pub tick_count: Option<TickCountSummary>,
}

impl AxisLayout {
    fn empty(anchor: AxisAnchor, text_style: LabelTextStyle) -> Self {
        Self {
            anchor,
            axis_size: 0.0,
            required_axis_size: 0.0,
            ticks: Vec::new(),
            hidden_groups: Vec::new(),
            minor_ticks: Vec::new(),
            max_text_width: None,
            overflow_paddings: SidePaddings::new(),
            include_modulo: 1,
            tick_step: None,
            time_interval: None,
            text_style,
            tick_count: None,
        }
    }

    /// Ticks that keep their label.
    pub fn visible_ticks(&self) -> impl Iterator<Item = &TickScene> {
        self.ticks.iter().filter(|tick| !tick.is_hidden)
    }
}

impl<M: TextMeasurer> AxisLayoutEngine<M> {
    /// Runs a full layout pass for `scale`.
    ///
    /// The scale's range length and ticks are reset and set again, so
    /// repeated passes with the same inputs give the same layout.
    pub fn layout(
        &self,
        scale: &mut AxisScale,
        request: &AxisLayoutRequest,
    ) -> AxisLayoutResult<AxisLayout> {
        validate_request(request)?;
        let anchor = self.config.anchor;
        let client_length = request.client_size.along(anchor);
        let text_style = self.config.resolve_text_style();

        scale.begin_layout_pass();
        if scale.is_null() {
            scale.set_scale_range(client_length);
            debug!(kind = %scale.kind(), "empty axis domain, nothing to lay out");
            return Ok(AxisLayout::empty(anchor, text_style));
        }

        let tick_length = self.config.effective_tick_length(scale.kind());
        let mut info = LayoutInfo::new(request.client_size, text_style, self.text_height());
        let mut source = TickSceneSource::default();
        let mut tick_count = None;
        let mut minor_ticks = Vec::new();

        match scale.kind() {
            DomainKind::Discrete => self.layout_discrete_ticks(scale, &mut info, &mut source),
            kind @ (DomainKind::Numeric | DomainKind::TimeSeries) => {
                tick_count = Some(self.layout_continuous_ticks(
                    kind,
                    scale,
                    &mut info,
                    &mut source,
                    &mut minor_ticks,
                )?);
            }
        }

        self.measure_label_boxes(&mut info);
        info.required_axis_size = estimate_required_size(info.max_label_box(), tick_length, anchor);
        // The axis never grows past the client's thickness.
        info.axis_size = request
            .fixed_axis_size
            .unwrap_or(info.required_axis_size)
            .min(request.client_size.across(anchor));

        if info.required_axis_size - info.axis_size > tick_length {
            let style = info.text_style();
            let max_text_width = resolve_max_text_width(
                info.widest_text_width(),
                info.text_height,
                style,
                anchor,
                info.axis_size - tick_slack(tick_length, style.angle, anchor),
            );
            info.set_max_text_width(max_text_width);
        }

        info.overflow_paddings = compute_overflow_paddings(&OverflowInput {
            label_boxes: info.label_boxes(),
            positions: &source.positions,
            client_length,
            anchor,
            reserved_paddings: &request.reserved_paddings,
            is_discrete: scale.kind() == DomainKind::Discrete,
        });

        let (ticks, hidden_groups) = self.build_tick_scenes(&info, &source);
        debug!(
            kind = %scale.kind(),
            ?anchor,
            client_length,
            tick_count = ticks.len(),
            include_modulo = info.include_modulo,
            required_axis_size = info.required_axis_size,
            axis_size = info.axis_size,
            max_text_width = ?info.max_text_width(),
            "axis layout pass"
        );

        Ok(AxisLayout {
            anchor,
            axis_size: info.axis_size,
            required_axis_size: info.required_axis_size,
            ticks,
            hidden_groups,
            minor_ticks,
            max_text_width: info.max_text_width(),
            overflow_paddings: info.overflow_paddings.clone(),
            include_modulo: info.include_modulo,
            tick_step: info.tick_step,
            time_interval: info.time_interval,
            text_style: info.text_style(),
            tick_count,
        })
    }

    fn layout_discrete_ticks(
        &self,
        scale: &mut AxisScale,
        info: &mut LayoutInfo,
        source: &mut TickSceneSource,
    ) {
        let AxisScale::Discrete(discrete) = &*scale else {
            return;
        };
        let ticks = self.generate_discrete_ticks(discrete);
        let tick_total = ticks.keys.len();

        scale.set_discrete_ticks(Some(tick_total));
        scale.set_scale_range(info.client_size.along(self.config.anchor));
        let AxisScale::Discrete(discrete) = &*scale else {
            return;
        };

        let widths = ticks
            .texts
            .iter()
            .map(|text| self.measure_text_width(text))
            .collect();
        source.positions = (0..tick_total).map(|i| discrete.index_to_pixel(i)).collect();
        source.raw_values = ticks.keys.iter().cloned().map(AxisValue::Key).collect();
        source.keys = ticks.keys;
        let band_step = discrete.band_step();

        info.set_ticks(ticks.values, ticks.texts);
        info.set_text_widths(widths);
        self.resolve_discrete_overlap(info, band_step);
    }

    fn layout_continuous_ticks(
        &self,
        kind: DomainKind,
        scale: &mut AxisScale,
        info: &mut LayoutInfo,
        source: &mut TickSceneSource,
        minor_ticks: &mut Vec<MinorTickScene>,
    ) -> AxisLayoutResult<TickCountSummary> {
        let (AxisScale::Numeric(continuous) | AxisScale::TimeSeries(continuous)) = &*scale else {
            return Err(AxisLayoutError::InvalidData(format!(
                "{kind} ticks need a continuous scale"
            )));
        };
        let Some(domain) = continuous.source_domain() else {
            return Err(AxisLayoutError::InvalidData(
                "continuous scale has no domain".to_owned(),
            ));
        };
        let client_length = info.client_size.along(self.config.anchor);
        let (candidate, summary) =
            self.resolve_continuous_ticks(kind, domain, client_length, info.text_height)?;

        let round_to_ticks = self.config.domain_round_mode == DomainRoundMode::Tick;
        scale.set_continuous_ticks(Some(candidate.ticks.values.clone()), round_to_ticks);
        scale.set_scale_range(client_length);

        let position = |value: f64| {
            let pixel = scale.value_to_pixel(&continuous_value(kind, value), 0);
            if self.config.reversed { client_length - pixel } else { pixel }
        };
        source.positions = candidate.ticks.values.iter().map(|v| position(*v)).collect();
        if self.config.show_minor_ticks {
            *minor_ticks = candidate
                .ticks
                .values
                .windows(2)
                .map(|pair| {
                    let value = (pair[0] + pair[1]) / 2.0;
                    MinorTickScene {
                        value,
                        position_px: position(value),
                    }
                })
                .collect();
        }

        let values: Vec<AxisValue> = candidate
            .ticks
            .values
            .iter()
            .map(|value| continuous_value(kind, *value))
            .collect();
        source.keys = candidate.texts.clone();
        source.raw_values = values.clone();

        info.tick_step = candidate.ticks.step;
        info.time_interval = candidate.ticks.time_interval;
        info.set_ticks(values, candidate.texts);
        let widths = info
            .tick_texts()
            .iter()
            .map(|text| self.measure_text_width(text))
            .collect();
        info.set_text_widths(widths);
        Ok(summary)
    }

    fn measure_label_boxes(&self, info: &mut LayoutInfo) {
        let style = info.text_style();
        let text_height = info.text_height;
        let boxes = info
            .text_widths()
            .iter()
            .map(|width| {
                compute_label_box(
                    *width,
                    text_height,
                    style.align,
                    style.baseline,
                    style.angle,
                    style.margin,
                )
            })
            .collect();
        info.set_label_boxes(boxes);
    }
}

fn validate_request(request: &AxisLayoutRequest) -> AxisLayoutResult<()> {
    if !request.client_size.is_valid() {
        return Err(AxisLayoutError::InvalidData(format!(
            "client size must be finite and >= 0, got {}x{}",
            request.client_size.width, request.client_size.height
        )));
    }
    if let Some(size) = request.fixed_axis_size {
        if !size.is_finite() || size < 0.0 {
            return Err(AxisLayoutError::InvalidConfig(format!(
                "fixed axis size must be finite and >= 0, got {size}"
            )));
        }
    }
    if request
        .reserved_paddings
        .values()
        .any(|padding| !padding.is_finite())
    {
        return Err(AxisLayoutError::InvalidData(
            "reserved paddings must be finite".to_owned(),
        ));
    }
    Ok(())
}
