use serde::{Deserialize, Serialize};

use crate::core::clock::{Period, TimeSource, TimeZoneClock};
use crate::core::types::{
    MIN_TASK_DURATION_MS, MS_PER_HOUR, TaskId, TimeInterval, hours_to_ms, ms_to_hours,
};
use crate::error::{TimelineError, TimelineResult};

/// Duration assumed for a scheduled task without an estimate.
pub const DEFAULT_SCHEDULED_DURATION_MS: i64 = MS_PER_HOUR;

/// Task record as supplied by the host application.
///
/// Only the scheduling fields are consumed; everything else the host tracks
/// about a task stays on the host side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub scheduled_start_ms: Option<i64>,
    #[serde(default)]
    pub duration_hours: Option<f64>,
    pub due_date_ms: i64,
    #[serde(default)]
    pub completed: bool,
}

impl TaskRecord {
    #[must_use]
    pub fn new(id: impl Into<TaskId>, title: impl Into<String>, due_date_ms: i64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            scheduled_start_ms: None,
            duration_hours: None,
            due_date_ms,
            completed: false,
        }
    }

    #[must_use]
    pub fn scheduled(mut self, start_ms: i64, duration_hours: Option<f64>) -> Self {
        self.scheduled_start_ms = Some(start_ms);
        self.duration_hours = duration_hours;
        self
    }

    #[must_use]
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    pub fn validate(&self) -> TimelineResult<()> {
        if self.id.as_str().is_empty() {
            return Err(TimelineError::InvalidData(
                "task id must not be empty".to_owned(),
            ));
        }
        if self.duration_hours.is_some_and(|hours| !hours.is_finite()) {
            return Err(TimelineError::InvalidData(format!(
                "task `{}` duration estimate must be finite",
                self.id
            )));
        }
        Ok(())
    }

    /// Derives the interval drawn for this task.
    ///
    /// - scheduled start and estimate: `[start, start + estimate]`
    /// - scheduled start only: one hour from the start
    /// - otherwise: from the due date to the end of its local day
    ///
    /// A reversed span moves the start to one hour before the end; a
    /// zero-width span is widened to the minimum task duration.
    #[must_use]
    pub fn interval<S: TimeSource>(&self, clock: &TimeZoneClock<S>) -> TimeInterval {
        let (mut start, end) = match (self.scheduled_start_ms, self.duration_hours) {
            (Some(start), Some(hours)) => (start, start.saturating_add(hours_to_ms(hours))),
            (Some(start), None) => (start, start.saturating_add(DEFAULT_SCHEDULED_DURATION_MS)),
            (None, _) => (
                self.due_date_ms,
                clock.next_period_start(self.due_date_ms, Period::Day),
            ),
        };

        if start > end {
            start = end.saturating_sub(MS_PER_HOUR);
        }
        let end = if end <= start {
            start.saturating_add(MIN_TASK_DURATION_MS)
        } else {
            end
        };

        TimeInterval::new(self.id.clone(), start, end)
    }
}

/// Fields of a task created by a duplicate or split gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub id: TaskId,
    pub source_id: TaskId,
    pub title: String,
    pub scheduled_start_ms: i64,
    pub duration_hours: f64,
    pub due_date_ms: i64,
}

impl NewTask {
    #[must_use]
    pub fn into_record(self) -> TaskRecord {
        TaskRecord {
            id: self.id,
            title: self.title,
            scheduled_start_ms: Some(self.scheduled_start_ms),
            duration_hours: Some(self.duration_hours),
            due_date_ms: self.due_date_ms,
            completed: false,
        }
    }
}

/// Committed change handed back to the host, once per completed gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TaskMutation {
    Update {
        id: TaskId,
        scheduled_start_ms: i64,
        duration_hours: f64,
        due_date_ms: i64,
    },
    Create(NewTask),
}

impl TaskMutation {
    /// Rescheduling update placing task `id` on `[start_ms, end_ms)`.
    #[must_use]
    pub fn reschedule(id: TaskId, start_ms: i64, end_ms: i64) -> Self {
        Self::Update {
            id,
            scheduled_start_ms: start_ms,
            duration_hours: ms_to_hours(end_ms.saturating_sub(start_ms)),
            due_date_ms: end_ms,
        }
    }

    #[must_use]
    pub fn task_id(&self) -> &TaskId {
        match self {
            Self::Update { id, .. } => id,
            Self::Create(task) => &task.id,
        }
    }

    /// Applies the mutation to a task list. Returns `false` for an update
    /// whose target is no longer present.
    pub fn apply(&self, tasks: &mut Vec<TaskRecord>) -> bool {
        match self {
            Self::Update {
                id,
                scheduled_start_ms,
                duration_hours,
                due_date_ms,
            } => match tasks.iter_mut().find(|task| &task.id == id) {
                Some(task) => {
                    task.scheduled_start_ms = Some(*scheduled_start_ms);
                    task.duration_hours = Some(*duration_hours);
                    task.due_date_ms = *due_date_ms;
                    true
                }
                None => false,
            },
            Self::Create(new_task) => {
                tasks.push(new_task.clone().into_record());
                true
            }
        }
    }
}
