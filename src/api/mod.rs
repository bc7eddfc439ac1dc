mod chart;
mod chart_config;
mod chart_updates;
mod coordinates;
mod gestures;
mod layout;
mod scheduler;
mod shared_axes;
mod shared_chart;
mod validation;
mod zoom_controller;
mod zoom_resolver;

pub use chart::CartesianChart;
pub use chart_config::{
    CartesianChartConfig, ChromeLayout, LegendPosition, UpdateThrottling, ZoomEdgeBounds,
};
pub use chart_updates::TickReport;
pub use layout::MeasureOutcome;
pub use scheduler::{ChartScheduler, DueUpdates, Throttler, UpdateStream};
pub use shared_chart::SharedCartesianChart;
