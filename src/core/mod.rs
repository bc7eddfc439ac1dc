pub mod axis;
pub mod bounds;
pub mod scaler;
pub mod separators;
pub mod series;
pub mod ticks;
pub mod types;

pub use axis::{
    Axis, AxisId, AxisLayout, AxisLimit, AxisOptions, AxisOrientation, AxisPosition, LabelerFn,
    SharedAxisGroup, default_label,
};
pub use bounds::{Bounds, degenerate_half_width};
pub use scaler::Scaler;
pub use separators::{AxisFrame, SeparatorPool, VisualSeparator};
pub use series::{ChartSeries, SeriesBounds, SeriesContext, SeriesId, SeriesKind, XySeries};
pub use ticks::{MAX_SEPARATORS, TickStep, enumerate_separators, resolve_tick_step};
pub use types::{Margin, MarginOverride, Point, Rect, Size};
