//! Pointer-driven editing of task intervals.
//!
//! A single drag session lives between pointer-down and pointer-up. While it
//! is live, the controller publishes an optimistic override interval that
//! render passes substitute for the dragged task's stored interval.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::scale::GridScale;
use crate::core::task::{NewTask, TaskMutation};
use crate::core::types::{MIN_TASK_DURATION_MS, MS_PER_SECOND, TaskId, TimeInterval, ms_to_hours};

/// Clicks closer than this to either edge of a task do not split it.
pub const SPLIT_EDGE_MARGIN_MS: i64 = MS_PER_SECOND;

pub const DUPLICATE_TITLE_SUFFIX: &str = " (copy)";
pub const SPLIT_TITLE_SUFFIX: &str = " (part 2)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Dragging,
}

/// Edit performed by a drag session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragMode {
    /// Shift the whole interval, keeping its duration.
    Move,
    /// Move the end edge.
    Resize,
    /// Move a copy, leaving the original in place.
    Duplicate,
}

/// Live drag state captured at pointer-down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragSession {
    pub task_id: TaskId,
    pub mode: DragMode,
    pub anchor_pointer_x: f64,
    pub original_start_ms: i64,
    pub original_end_ms: i64,
    pub title: String,
}

impl DragSession {
    fn original(&self) -> TimeInterval {
        TimeInterval::new(
            self.task_id.clone(),
            self.original_start_ms,
            self.original_end_ms,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
enum DragState {
    Idle,
    Dragging {
        session: DragSession,
        preview: TimeInterval,
    },
}

/// Outcome of a completed drag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragCommit {
    pub mode: DragMode,
    pub mutation: TaskMutation,
}

/// Outcome of a blade click inside a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitOutcome {
    pub split_at_ms: i64,
    /// Shortens the original task to end at the split point.
    pub original: TaskMutation,
    /// Covers the remainder of the original interval.
    pub created: NewTask,
}

/// Drag/split state machine. At most one session is live at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionController {
    state: DragState,
    snap_enabled: bool,
    sequence: u64,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self {
            state: DragState::Idle,
            snap_enabled: true,
            sequence: 0,
        }
    }
}

impl InteractionController {
    #[must_use]
    pub fn new(snap_enabled: bool) -> Self {
        Self {
            snap_enabled,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        match self.state {
            DragState::Idle => InteractionMode::Idle,
            DragState::Dragging { .. } => InteractionMode::Dragging,
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.mode() == InteractionMode::Dragging
    }

    #[must_use]
    pub fn snap_enabled(&self) -> bool {
        self.snap_enabled
    }

    pub fn set_snap_enabled(&mut self, enabled: bool) {
        self.snap_enabled = enabled;
    }

    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging { session, .. } => Some(session),
        }
    }

    /// Interval to draw in place of the dragged task's stored interval.
    #[must_use]
    pub fn optimistic_override(&self) -> Option<&TimeInterval> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging { preview, .. } => Some(preview),
        }
    }

    /// Starts a session on `interval`.
    ///
    /// Accepted only while idle and for `Move`/`Resize`; a move with the
    /// duplicate modifier becomes a `Duplicate` session. Returns `false` when
    /// the press is ignored.
    pub fn pointer_down(
        &mut self,
        interval: &TimeInterval,
        title: &str,
        mode: DragMode,
        pointer_x: f64,
        duplicate_modifier: bool,
    ) -> bool {
        if self.is_dragging() || !pointer_x.is_finite() {
            return false;
        }
        let mode = match (mode, duplicate_modifier) {
            (DragMode::Move, true) => DragMode::Duplicate,
            (DragMode::Move, false) => DragMode::Move,
            (DragMode::Resize, _) => DragMode::Resize,
            (DragMode::Duplicate, _) => return false,
        };

        let session = DragSession {
            task_id: interval.id.clone(),
            mode,
            anchor_pointer_x: pointer_x,
            original_start_ms: interval.start_ms,
            original_end_ms: interval.end_ms,
            title: title.to_owned(),
        };
        debug!(task_id = %session.task_id, ?mode, pointer_x, "drag started");
        let preview = session.original();
        self.state = DragState::Dragging { session, preview };
        true
    }

    /// Recomputes the override from the pointer position.
    ///
    /// The override is derived from the session origin each time, so repeated
    /// moves never accumulate rounding.
    pub fn pointer_move(&mut self, pointer_x: f64, scale: GridScale) -> Option<&TimeInterval> {
        let snap_enabled = self.snap_enabled;
        let DragState::Dragging { session, preview } = &mut self.state else {
            return None;
        };
        if !pointer_x.is_finite() {
            return Some(&*preview);
        }

        // Extreme pointer positions saturate at the ends of the time axis.
        let delta_ms = scale.px_delta_to_ms(pointer_x - session.anchor_pointer_x);
        let snap = |value: i64| if snap_enabled { scale.snap(value) } else { value };
        let (start_ms, end_ms) = match session.mode {
            DragMode::Move | DragMode::Duplicate => {
                let duration = session.original_end_ms - session.original_start_ms;
                let start = snap(session.original_start_ms.saturating_add(delta_ms))
                    .min(i64::MAX - duration);
                (start, start + duration)
            }
            DragMode::Resize => {
                let end = snap(session.original_end_ms.saturating_add(delta_ms))
                    .max(session.original_start_ms.saturating_add(MIN_TASK_DURATION_MS));
                (session.original_start_ms, end)
            }
        };

        *preview = preview.with_span(start_ms, end_ms);
        trace!(task_id = %session.task_id, start_ms, end_ms, "drag preview updated");
        Some(&*preview)
    }

    /// Ends the session and returns its single commit.
    ///
    /// Releasing without any move commits the original interval unchanged.
    /// A duplicate gets an id for which `is_taken` returns `false`.
    /// Returns `None` while idle.
    pub fn pointer_up(&mut self, is_taken: impl Fn(&TaskId) -> bool) -> Option<DragCommit> {
        let DragState::Dragging { session, preview } =
            std::mem::replace(&mut self.state, DragState::Idle)
        else {
            return None;
        };

        let mutation = match session.mode {
            DragMode::Move | DragMode::Resize => {
                TaskMutation::reschedule(session.task_id.clone(), preview.start_ms, preview.end_ms)
            }
            DragMode::Duplicate => TaskMutation::Create(NewTask {
                id: self.next_id(&session.task_id, "copy", &is_taken),
                source_id: session.task_id.clone(),
                title: format!("{}{DUPLICATE_TITLE_SUFFIX}", session.title),
                scheduled_start_ms: preview.start_ms,
                duration_hours: ms_to_hours(preview.duration_ms()),
                due_date_ms: preview.end_ms,
            }),
        };
        debug!(
            task_id = %session.task_id,
            mode = ?session.mode,
            start_ms = preview.start_ms,
            end_ms = preview.end_ms,
            "drag committed"
        );
        Some(DragCommit {
            mode: session.mode,
            mutation,
        })
    }

    /// Cuts `interval` in two at the pointer position.
    ///
    /// Ignored while a drag is live and when the click is within
    /// `SPLIT_EDGE_MARGIN_MS` of either edge (inclusive). The remainder gets
    /// an id for which `is_taken` returns `false`.
    pub fn blade_split(
        &mut self,
        interval: &TimeInterval,
        title: &str,
        pointer_x: f64,
        scale: GridScale,
        is_taken: impl Fn(&TaskId) -> bool,
    ) -> Option<SplitOutcome> {
        if self.is_dragging() || !pointer_x.is_finite() {
            return None;
        }
        let split_at_ms = scale.px_to_time(pointer_x);
        if split_at_ms.saturating_sub(interval.start_ms) <= SPLIT_EDGE_MARGIN_MS
            || interval.end_ms.saturating_sub(split_at_ms) <= SPLIT_EDGE_MARGIN_MS
        {
            trace!(task_id = %interval.id, split_at_ms, "blade click too close to edge");
            return None;
        }

        let created = NewTask {
            id: self.next_id(&interval.id, "part", &is_taken),
            source_id: interval.id.clone(),
            title: format!("{title}{SPLIT_TITLE_SUFFIX}"),
            scheduled_start_ms: split_at_ms,
            duration_hours: ms_to_hours(interval.end_ms - split_at_ms),
            due_date_ms: interval.end_ms,
        };
        debug!(task_id = %interval.id, split_at_ms, new_id = %created.id, "task split");
        Some(SplitOutcome {
            split_at_ms,
            original: TaskMutation::reschedule(interval.id.clone(), interval.start_ms, split_at_ms),
            created,
        })
    }

    fn next_id(
        &mut self,
        source: &TaskId,
        kind: &str,
        is_taken: impl Fn(&TaskId) -> bool,
    ) -> TaskId {
        loop {
            self.sequence += 1;
            let id = TaskId::new(format!("{source}:{kind}{}", self.sequence));
            if !is_taken(&id) {
                return id;
            }
        }
    }
}
