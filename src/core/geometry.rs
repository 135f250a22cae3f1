use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::lanes::{LaneLayout, LanePlacement};
use crate::core::scale::GridScale;
use crate::core::types::TaskId;
use crate::error::{TimelineError, TimelineResult};

/// Vertical layout of lanes in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneMetrics {
    pub lane_height_px: f64,
    pub lane_gap_px: f64,
}

impl Default for LaneMetrics {
    fn default() -> Self {
        Self {
            lane_height_px: 28.0,
            lane_gap_px: 6.0,
        }
    }
}

impl LaneMetrics {
    pub fn validate(self) -> TimelineResult<Self> {
        if !self.lane_height_px.is_finite() || self.lane_height_px <= 0.0 {
            return Err(TimelineError::InvalidData(
                "lane height must be finite and > 0".to_owned(),
            ));
        }
        if !self.lane_gap_px.is_finite() || self.lane_gap_px < 0.0 {
            return Err(TimelineError::InvalidData(
                "lane gap must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn lane_top(self, lane_index: usize) -> f64 {
        lane_index as f64 * (self.lane_height_px + self.lane_gap_px)
    }

    #[must_use]
    pub fn lane_center(self, lane_index: usize) -> f64 {
        self.lane_top(lane_index) + self.lane_height_px / 2.0
    }

    #[must_use]
    pub fn total_height(self, lane_count: usize) -> f64 {
        if lane_count == 0 {
            return 0.0;
        }
        self.lane_top(lane_count) - self.lane_gap_px
    }
}

/// Pixel rectangle of one task bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub task_id: TaskId,
    pub lane_index: usize,
    pub start_ms: i64,
    pub end_ms: i64,
    pub left_px: f64,
    pub width_px: f64,
    pub top_px: f64,
    pub height_px: f64,
    /// `true` for the transient bar of an in-progress drag.
    pub is_preview: bool,
}

impl BarGeometry {
    #[must_use]
    pub fn right_px(&self) -> f64 {
        self.left_px + self.width_px
    }

    #[must_use]
    pub fn center_y(&self) -> f64 {
        self.top_px + self.height_px / 2.0
    }
}

/// Projects packed placements into bar rectangles.
///
/// Pure and order-preserving; the optional parallel path yields identical output.
#[must_use]
pub fn project_bars(layout: &LaneLayout, scale: GridScale, metrics: LaneMetrics) -> Vec<BarGeometry> {
    #[cfg(feature = "parallel-projection")]
    {
        layout
            .placements
            .par_iter()
            .map(|placement| project_single_bar(placement, scale, metrics))
            .collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        layout
            .placements
            .iter()
            .map(|placement| project_single_bar(placement, scale, metrics))
            .collect()
    }
}

fn project_single_bar(
    placement: &LanePlacement,
    scale: GridScale,
    metrics: LaneMetrics,
) -> BarGeometry {
    BarGeometry {
        task_id: placement.id.clone(),
        lane_index: placement.lane_index,
        start_ms: placement.start_ms,
        end_ms: placement.end_ms,
        left_px: scale.time_to_px(placement.start_ms),
        width_px: scale.duration_to_px(placement.end_ms.saturating_sub(placement.start_ms)),
        top_px: metrics.lane_top(placement.lane_index),
        height_px: metrics.lane_height_px,
        is_preview: false,
    }
}
