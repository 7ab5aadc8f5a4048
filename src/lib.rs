//! axis-fit: axis layout and tick fitting for declarative charts.
//!
//! Given a scale (discrete categories, numeric range or time series) and the
//! pixels available, the engine picks ticks, formats and measures their
//! labels, thins or rotates colliding labels, sizes the axis and hands back
//! a per-tick scene for a rendering layer to draw.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{AxisLayout, AxisLayoutConfig, AxisLayoutEngine, AxisLayoutRequest};
pub use error::{AxisLayoutError, AxisLayoutResult};
