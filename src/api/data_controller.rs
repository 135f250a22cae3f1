use tracing::{debug, trace};

use crate::core::{DependencyMap, TaskId, TaskMutation, TaskRecord, TimeInterval, TimeSource};
use crate::error::{TimelineError, TimelineResult};
use crate::extensions::PluginEvent;

use super::TimelineEngine;
use super::validation::validate_tasks;

impl<S: TimeSource> TimelineEngine<S> {
    /// Replaces the working task list.
    ///
    /// The list is rejected as a whole when any record is invalid or two
    /// records share an id.
    pub fn set_tasks(&mut self, tasks: Vec<TaskRecord>) -> TimelineResult<()> {
        validate_tasks(&tasks)?;
        debug!(count = tasks.len(), "set tasks");
        self.tasks = tasks;
        self.emit_plugin_event(PluginEvent::TasksUpdated {
            tasks_len: self.tasks.len(),
        });
        Ok(())
    }

    #[must_use]
    pub fn tasks(&self) -> &[TaskRecord] {
        &self.tasks
    }

    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<&TaskRecord> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    pub fn set_task_completed(&mut self, id: &TaskId, completed: bool) -> TimelineResult<()> {
        let task = self
            .tasks
            .iter_mut()
            .find(|task| &task.id == id)
            .ok_or_else(|| TimelineError::UnknownTask(id.to_string()))?;
        task.completed = completed;
        trace!(task_id = %id, completed, "task completion changed");
        Ok(())
    }

    /// Replaces the dependency map (`dependent -> [dependencies]`).
    pub fn set_dependencies(&mut self, dependencies: DependencyMap) {
        debug!(dependents = dependencies.len(), "set dependencies");
        self.dependencies = dependencies;
    }

    #[must_use]
    pub fn dependencies(&self) -> &DependencyMap {
        &self.dependencies
    }

    /// Stored interval of every task, in task-list order.
    #[must_use]
    pub fn task_intervals(&self) -> Vec<TimeInterval> {
        self.tasks
            .iter()
            .map(|task| task.interval(&self.clock))
            .collect()
    }

    pub(super) fn task_interval(&self, id: &TaskId) -> Option<(TimeInterval, String)> {
        self.task(id)
            .map(|task| (task.interval(&self.clock), task.title.clone()))
    }

    pub(super) fn apply_mutation(&mut self, mutation: &TaskMutation) -> bool {
        let applied = mutation.apply(&mut self.tasks);
        if !applied {
            debug!(task_id = %mutation.task_id(), "mutation target no longer present");
        }
        applied
    }
}
