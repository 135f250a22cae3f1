use tracing::debug;

use crate::core::{TaskId, TaskMutation, TimeInterval, TimeSource};
use crate::error::TimelineResult;
use crate::extensions::PluginEvent;
use crate::interaction::{DragMode, DragSession, InteractionMode, SplitOutcome};

use super::TimelineEngine;
use super::validation::validate_pointer_x;

impl<S: TimeSource> TimelineEngine<S> {
    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    #[must_use]
    pub fn drag_session(&self) -> Option<&DragSession> {
        self.interaction.session()
    }

    /// Interval currently drawn for the dragged task, if a drag is live.
    #[must_use]
    pub fn optimistic_override(&self) -> Option<&TimeInterval> {
        self.interaction.optimistic_override()
    }

    /// Starts a drag on `task_id`. Returns `false` when the press is ignored
    /// (drag already live, unknown task, or a `Duplicate` mode request).
    pub fn pointer_down(
        &mut self,
        task_id: &TaskId,
        mode: DragMode,
        pointer_x: f64,
        duplicate_modifier: bool,
    ) -> TimelineResult<bool> {
        validate_pointer_x(pointer_x)?;
        let Some((interval, title)) = self.task_interval(task_id) else {
            debug!(task_id = %task_id, "pointer down on unknown task ignored");
            return Ok(false);
        };
        if !self
            .interaction
            .pointer_down(&interval, &title, mode, pointer_x, duplicate_modifier)
        {
            return Ok(false);
        }
        let mode = self
            .interaction
            .session()
            .map_or(mode, |session| session.mode);
        self.emit_plugin_event(PluginEvent::DragStarted {
            task_id: task_id.clone(),
            mode,
        });
        Ok(true)
    }

    /// Updates the live drag. Returns the new override, or `None` while idle.
    pub fn pointer_move(&mut self, pointer_x: f64) -> TimelineResult<Option<TimeInterval>> {
        validate_pointer_x(pointer_x)?;
        if !self.interaction.is_dragging() {
            return Ok(None);
        }
        let scale = self.grid_scale()?;
        let preview = self.interaction.pointer_move(pointer_x, scale).cloned();
        if let Some(preview) = &preview {
            self.emit_plugin_event(PluginEvent::DragUpdated {
                task_id: preview.id.clone(),
                start_ms: preview.start_ms,
                end_ms: preview.end_ms,
            });
        }
        Ok(preview)
    }

    /// Ends the live drag, writes its commit into the task list and returns it.
    ///
    /// Returns `None` while idle, and when the dragged task was removed from
    /// the list before release; no event is emitted in that case.
    pub fn pointer_up(&mut self) -> Option<TaskMutation> {
        let tasks = &self.tasks;
        let commit = self
            .interaction
            .pointer_up(|id| tasks.iter().any(|task| &task.id == id))?;
        if !self.apply_mutation(&commit.mutation) {
            return None;
        }
        let event = match &commit.mutation {
            TaskMutation::Update { .. } => PluginEvent::TaskCommitted {
                mutation: commit.mutation.clone(),
            },
            TaskMutation::Create(created) => PluginEvent::TaskCreated {
                task_id: created.id.clone(),
                source_id: created.source_id.clone(),
            },
        };
        self.emit_plugin_event(event);
        Some(commit.mutation)
    }

    /// Splits `task_id` at the pointer position and applies both halves.
    ///
    /// Returns `None` for ignored clicks: drag in progress, unknown task, or
    /// a click too close to an edge.
    pub fn blade_click(
        &mut self,
        task_id: &TaskId,
        pointer_x: f64,
    ) -> TimelineResult<Option<SplitOutcome>> {
        validate_pointer_x(pointer_x)?;
        let Some((interval, title)) = self.task_interval(task_id) else {
            debug!(task_id = %task_id, "blade click on unknown task ignored");
            return Ok(None);
        };
        let scale = self.grid_scale()?;
        let tasks = &self.tasks;
        let Some(outcome) = self
            .interaction
            .blade_split(&interval, &title, pointer_x, scale, |id| {
                tasks.iter().any(|task| &task.id == id)
            })
        else {
            return Ok(None);
        };

        self.apply_mutation(&outcome.original);
        self.apply_mutation(&TaskMutation::Create(outcome.created.clone()));
        self.emit_plugin_event(PluginEvent::TaskSplit {
            task_id: task_id.clone(),
            new_task_id: outcome.created.id.clone(),
            split_at_ms: outcome.split_at_ms,
        });
        Ok(Some(outcome))
    }
}
