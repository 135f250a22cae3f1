use serde::{Deserialize, Serialize};

use crate::core::{LaneMetrics, ViewMode, ZoomPresets};
use crate::error::{TimelineError, TimelineResult};

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load timeline
/// setup without inventing their own ad-hoc format. Every field has a default,
/// so `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEngineConfig {
    /// IANA zone id. Unknown ids fall back to UTC.
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
    #[serde(default)]
    pub view_mode: ViewMode,
    /// Instant whose calendar period is shown. `None` means "now".
    #[serde(default)]
    pub anchor_ms: Option<i64>,
    #[serde(default = "default_viewport_width_px")]
    pub viewport_width_px: f64,
    #[serde(default)]
    pub lane_metrics: LaneMetrics,
    #[serde(default)]
    pub zoom_presets: ZoomPresets,
    #[serde(default = "default_snap_to_grid")]
    pub snap_to_grid: bool,
}

impl Default for TimelineEngineConfig {
    fn default() -> Self {
        Self {
            time_zone: default_time_zone(),
            view_mode: ViewMode::default(),
            anchor_ms: None,
            viewport_width_px: default_viewport_width_px(),
            lane_metrics: LaneMetrics::default(),
            zoom_presets: ZoomPresets::default(),
            snap_to_grid: default_snap_to_grid(),
        }
    }
}

impl TimelineEngineConfig {
    #[must_use]
    pub fn new(time_zone: impl Into<String>) -> Self {
        Self {
            time_zone: time_zone.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_view_mode(mut self, view_mode: ViewMode) -> Self {
        self.view_mode = view_mode;
        self
    }

    #[must_use]
    pub fn with_anchor_ms(mut self, anchor_ms: i64) -> Self {
        self.anchor_ms = Some(anchor_ms);
        self
    }

    #[must_use]
    pub fn with_viewport_width_px(mut self, width_px: f64) -> Self {
        self.viewport_width_px = width_px;
        self
    }

    #[must_use]
    pub fn with_lane_metrics(mut self, metrics: LaneMetrics) -> Self {
        self.lane_metrics = metrics;
        self
    }

    #[must_use]
    pub fn with_zoom_presets(mut self, presets: ZoomPresets) -> Self {
        self.zoom_presets = presets;
        self
    }

    #[must_use]
    pub fn with_snap_to_grid(mut self, enabled: bool) -> Self {
        self.snap_to_grid = enabled;
        self
    }

    pub fn to_json_pretty(&self) -> TimelineResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            TimelineError::InvalidData(format!("failed to serialize engine config: {e}"))
        })
    }

    pub fn from_json_str(input: &str) -> TimelineResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            TimelineError::InvalidData(format!("failed to parse engine config json: {e}"))
        })
    }
}

fn default_time_zone() -> String {
    "UTC".to_owned()
}

fn default_viewport_width_px() -> f64 {
    1200.0
}

fn default_snap_to_grid() -> bool {
    true
}
