use serde::{Deserialize, Serialize};

use crate::core::{MarginOverride, Size};
use crate::error::{ChartError, ChartResult};
use crate::interaction::ZoomAndPanMode;

/// How far a zoom-out or pan may go past the data edge, as a fraction of the
/// current span.
///
/// The `active` bound applies while a gesture is held and is the looser one,
/// so dragging past the edge feels elastic before the release snaps back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomEdgeBounds {
    #[serde(default = "default_active_edge_fraction")]
    pub active: f64,
    #[serde(default = "default_inactive_edge_fraction")]
    pub inactive: f64,
}

impl Default for ZoomEdgeBounds {
    fn default() -> Self {
        Self {
            active: default_active_edge_fraction(),
            inactive: default_inactive_edge_fraction(),
        }
    }
}

impl ZoomEdgeBounds {
    #[must_use]
    pub fn fraction(self, is_active: bool) -> f64 {
        if is_active { self.active } else { self.inactive }
    }
}

/// Trailing-edge throttle windows, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateThrottling {
    #[serde(default = "default_measure_ms")]
    pub measure_ms: u64,
    #[serde(default = "default_tooltip_ms")]
    pub tooltip_ms: u64,
    #[serde(default = "default_panning_ms")]
    pub panning_ms: u64,
}

impl Default for UpdateThrottling {
    fn default() -> Self {
        Self {
            measure_ms: default_measure_ms(),
            tooltip_ms: default_tooltip_ms(),
            panning_ms: default_panning_ms(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LegendPosition {
    #[default]
    Hidden,
    Top,
    Bottom,
    Left,
    Right,
}

/// Title and legend sizes supplied by the host; the core only reserves space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ChromeLayout {
    #[serde(default)]
    pub title_size: Option<Size>,
    #[serde(default)]
    pub legend_position: LegendPosition,
    #[serde(default)]
    pub legend_size: Size,
}

/// Chart bootstrap configuration.
///
/// Serializable so hosts can persist chart setup alongside their own state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CartesianChartConfig {
    pub control_size: Size,
    #[serde(default)]
    pub draw_margin: MarginOverride,
    #[serde(default = "default_zoom_mode")]
    pub zoom_mode: ZoomAndPanMode,
    #[serde(default = "default_zooming_speed")]
    pub zooming_speed: f64,
    #[serde(default)]
    pub edge_bounds: ZoomEdgeBounds,
    #[serde(default)]
    pub throttling: UpdateThrottling,
    #[serde(default = "default_auto_update_enabled")]
    pub auto_update_enabled: bool,
    #[serde(default)]
    pub chrome: ChromeLayout,
}

impl CartesianChartConfig {
    #[must_use]
    pub fn new(control_size: Size) -> Self {
        Self {
            control_size,
            draw_margin: MarginOverride::auto(),
            zoom_mode: default_zoom_mode(),
            zooming_speed: default_zooming_speed(),
            edge_bounds: ZoomEdgeBounds::default(),
            throttling: UpdateThrottling::default(),
            auto_update_enabled: default_auto_update_enabled(),
            chrome: ChromeLayout::default(),
        }
    }

    #[must_use]
    pub fn with_draw_margin(mut self, draw_margin: MarginOverride) -> Self {
        self.draw_margin = draw_margin;
        self
    }

    #[must_use]
    pub fn with_zoom_mode(mut self, zoom_mode: ZoomAndPanMode) -> Self {
        self.zoom_mode = zoom_mode;
        self
    }

    #[must_use]
    pub fn with_zooming_speed(mut self, zooming_speed: f64) -> Self {
        self.zooming_speed = zooming_speed;
        self
    }

    #[must_use]
    pub fn with_edge_bounds(mut self, edge_bounds: ZoomEdgeBounds) -> Self {
        self.edge_bounds = edge_bounds;
        self
    }

    #[must_use]
    pub fn with_throttling(mut self, throttling: UpdateThrottling) -> Self {
        self.throttling = throttling;
        self
    }

    #[must_use]
    pub fn with_auto_update(mut self, enabled: bool) -> Self {
        self.auto_update_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title_size: Size) -> Self {
        self.chrome.title_size = Some(title_size);
        self
    }

    #[must_use]
    pub fn with_legend(mut self, position: LegendPosition, size: Size) -> Self {
        self.chrome.legend_position = position;
        self.chrome.legend_size = size;
        self
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_zoom_mode() -> ZoomAndPanMode {
    ZoomAndPanMode::X
}

fn default_zooming_speed() -> f64 {
    0.2
}

fn default_auto_update_enabled() -> bool {
    true
}

fn default_active_edge_fraction() -> f64 {
    0.15
}

fn default_inactive_edge_fraction() -> f64 {
    0.05
}

fn default_measure_ms() -> u64 {
    50
}

fn default_tooltip_ms() -> u64 {
    50
}

fn default_panning_ms() -> u64 {
    30
}
