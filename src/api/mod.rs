mod axis_discrete_overlap_resolver;
mod axis_label_format;
mod axis_label_trim_resolver;
mod axis_layout_config;
mod axis_layout_coordinator;
mod axis_size_estimator;
mod axis_tick_count_resolver;
mod axis_tick_generator;
mod axis_tick_scene_builder;
mod engine;
mod json_contract;
mod label_cache;
mod layout_info;

pub use axis_discrete_overlap_resolver::rotated_text_style;
pub use axis_label_format::{
    TickFormatContext, TickLabelFormatterFn, format_numeric_label, format_time_label,
};
pub use axis_label_trim_resolver::resolve_max_text_width;
pub use axis_layout_config::{
    AxisLayoutConfig, CONTINUOUS_LABEL_SPACING_EM, DISCRETE_LABEL_SPACING_EM, DomainRoundMode,
    LabelTextStyle,
};
pub use axis_layout_coordinator::{AxisLayout, AxisLayoutRequest};
pub use axis_size_estimator::{OverflowInput, compute_overflow_paddings, estimate_required_size};
pub use axis_tick_count_resolver::TickCountSummary;
pub use axis_tick_scene_builder::{MinorTickScene, TickScene, TooltipFormatterFn};
pub use engine::AxisLayoutEngine;
pub use json_contract::{AXIS_LAYOUT_JSON_SCHEMA_V1, AxisLayoutJsonContractV1};
pub use label_cache::LabelWidthCacheStats;
pub use layout_info::LayoutInfo;
