pub mod label_box;
pub mod nice_ticks;
pub mod overlap;
pub mod scale;
pub mod text_metrics;
pub mod tick_count_search;
pub mod time_ticks;
pub mod types;

pub use label_box::{LabelBoundingBox, compute_label_box, extent_toward};
pub use nice_ticks::{
    ContinuousTicks, ExponentBounds, ExponentOverflow, NiceStep, nice_step, numeric_ticks,
};
pub use overlap::{
    HiddenTickGroup, IncludeModuloInput, OverlapMode, compute_include_modulo, group_hidden_ticks,
    labels_collide,
};
pub use scale::{AxisScale, CategoryItem, ContinuousScale, DiscreteScale, DomainKind, ScaleSpec};
pub use text_metrics::{Font, HeuristicTextMeasurer, TEXT_HEIGHT_RATIO, TextMeasurer};
pub use tick_count_search::{
    SearchDirection, SearchTermination, TickCandidate, TickCountSearchOutcome,
    TickCountSearchParams, search_tick_count,
};
pub use time_ticks::{TimeInterval, TimeUnit, select_time_interval, time_ticks};
pub use types::{
    AxisAnchor, AxisValue, ClientSize, Point, Side, SidePaddings, TextAlign, TextBaseline,
};
