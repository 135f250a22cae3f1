use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    BarGeometry, Connector, Gap, TaskId, TimeInterval, TimeSource, TimelineGrid, pack_lanes,
    project_bars, project_dependencies,
};
use crate::error::TimelineResult;
use crate::interaction::DragMode;

use super::TimelineEngine;

/// Appended to the dragged task id for the ghost bar of a duplicate drag.
pub const PREVIEW_ID_SUFFIX: &str = ":preview";

/// Everything a host needs to draw one pass of the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineFrame {
    pub grid: TimelineGrid,
    /// In lane-packing order.
    pub bars: Vec<BarGeometry>,
    pub gaps: Vec<Gap>,
    pub connectors: Vec<Connector>,
    /// Rows to draw, never fewer than `MIN_VISIBLE_LANES`.
    pub lane_count: usize,
    pub total_width_px: f64,
    pub total_height_px: f64,
    /// Horizontal position of "now" when it falls inside the view.
    pub now_px: Option<f64>,
    /// Suggested scroll offset putting "now" a third of the way into the viewport.
    pub scroll_hint_px: f64,
}

impl TimelineFrame {
    #[must_use]
    pub fn bar(&self, id: &TaskId) -> Option<&BarGeometry> {
        self.bars
            .iter()
            .find(|bar| &bar.task_id == id && !bar.is_preview)
            .or_else(|| self.bars.iter().find(|bar| &bar.task_id == id))
    }

    #[must_use]
    pub fn preview_bar(&self) -> Option<&BarGeometry> {
        self.bars.iter().find(|bar| bar.is_preview)
    }
}

impl<S: TimeSource> TimelineEngine<S> {
    /// Runs a full render pass: grid, packing, bar geometry, gaps, connectors.
    ///
    /// Only tasks overlapping the view window are packed. While a drag is
    /// live the override replaces the dragged task's stored interval; a
    /// duplicate drag keeps the original and adds a ghost bar instead.
    pub fn frame(&self) -> TimelineResult<TimelineFrame> {
        let grid = self.grid()?;
        let (view_start, view_end) = (grid.view_start_ms, grid.view_end_ms);

        let override_interval = self.interaction.optimistic_override();
        let drag_mode = self.interaction.session().map(|session| session.mode);
        let mut intervals: Vec<TimeInterval> = Vec::with_capacity(self.tasks.len() + 1);
        let mut preview_id: Option<TaskId> = None;
        for task in &self.tasks {
            let stored = task.interval(&self.clock);
            let interval = match (override_interval, drag_mode) {
                (Some(preview), Some(DragMode::Move | DragMode::Resize))
                    if preview.id == task.id =>
                {
                    preview_id = Some(task.id.clone());
                    preview.clone()
                }
                _ => stored,
            };
            if interval.overlaps(view_start, view_end) {
                intervals.push(interval);
            }
        }
        if let (Some(preview), Some(DragMode::Duplicate)) = (override_interval, drag_mode) {
            let ghost_id = TaskId::new(format!("{}{PREVIEW_ID_SUFFIX}", preview.id));
            let ghost = TimeInterval::new(ghost_id.clone(), preview.start_ms, preview.end_ms);
            if ghost.overlaps(view_start, view_end) {
                intervals.push(ghost);
                preview_id = Some(ghost_id);
            }
        }

        let layout = pack_lanes(&intervals);
        let lane_count = layout.lane_count();
        let mut bars = project_bars(&layout, grid.scale, self.config.lane_metrics);
        if let Some(preview_id) = &preview_id {
            for bar in bars.iter_mut().filter(|bar| &bar.task_id == preview_id) {
                bar.is_preview = true;
            }
        }

        let by_id: IndexMap<TaskId, BarGeometry> = bars
            .iter()
            .map(|bar| (bar.task_id.clone(), bar.clone()))
            .collect();
        let completed: HashSet<&TaskId> = self
            .tasks
            .iter()
            .filter(|task| task.completed)
            .map(|task| &task.id)
            .collect();
        let connectors =
            project_dependencies(&self.dependencies, &by_id, |id| completed.contains(id));

        let total_width_px = grid.total_width_px();
        let now_ms = self.clock.now_ms();
        let now_px = grid
            .contains(now_ms)
            .then(|| grid.scale.time_to_px(now_ms));
        let scroll_hint_px = now_px.map_or(0.0, |px| {
            let max_scroll = (total_width_px - self.config.viewport_width_px).max(0.0);
            (px - self.config.viewport_width_px / 3.0).clamp(0.0, max_scroll)
        });

        debug!(
            bars = bars.len(),
            gaps = layout.gaps.len(),
            connectors = connectors.len(),
            lane_count,
            dragging = self.interaction.is_dragging(),
            "render pass"
        );
        Ok(TimelineFrame {
            total_height_px: self.config.lane_metrics.total_height(lane_count),
            grid,
            bars,
            gaps: layout.gaps,
            connectors,
            lane_count,
            total_width_px,
            now_px,
            scroll_hint_px,
        })
    }
}
