use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{TaskId, TimeSource, ViewMode, ZoomConfig};
use crate::error::TimelineResult;
use crate::interaction::InteractionMode;

use super::{TimelineEngine, TimelineFrame};

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSnapshot {
    pub time_zone: String,
    pub zone_fallback: bool,
    pub view_mode: ViewMode,
    pub zoom_index: usize,
    pub zoom: ZoomConfig,
    pub anchor_ms: i64,
    pub viewport_width_px: f64,
    pub interaction_mode: InteractionMode,
    pub frame: TimelineFrame,
    pub task_titles: IndexMap<TaskId, String>,
}

impl<S: TimeSource> TimelineEngine<S> {
    pub fn snapshot(&self) -> TimelineResult<TimelineSnapshot> {
        Ok(TimelineSnapshot {
            time_zone: self.clock.zone_id().to_owned(),
            zone_fallback: self.clock.is_fallback(),
            view_mode: self.zoom.mode(),
            zoom_index: self.zoom.index(),
            zoom: self.active_zoom(),
            anchor_ms: self.anchor_ms,
            viewport_width_px: self.config.viewport_width_px,
            interaction_mode: self.interaction.mode(),
            frame: self.frame()?,
            task_titles: self
                .tasks
                .iter()
                .map(|task| (task.id.clone(), task.title.clone()))
                .collect(),
        })
    }
}
