//! cartesian-chart: layout, scaling and viewport core for Cartesian charts.
//!
//! The crate measures axes, resolves the plot area, keeps tick separators in
//! sync across passes and applies zoom/pan gestures. Painting is delegated to
//! a [`render::Renderer`] implementation supplied by the host.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{CartesianChart, CartesianChartConfig, MeasureOutcome, SharedCartesianChart};
pub use error::{ChartError, ChartResult};
