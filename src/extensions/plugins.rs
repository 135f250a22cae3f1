use serde::{Deserialize, Serialize};

use crate::core::{TaskId, TaskMutation, ViewMode};
use crate::interaction::{DragMode, InteractionMode};

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginContext {
    pub view_mode: ViewMode,
    pub zoom_index: usize,
    pub view_start_ms: i64,
    pub view_end_ms: i64,
    pub tasks_len: usize,
    pub interaction_mode: InteractionMode,
    /// The configured zone could not be resolved and UTC is in use.
    pub zone_fallback: bool,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PluginEvent {
    TasksUpdated {
        tasks_len: usize,
    },
    ViewChanged {
        view_start_ms: i64,
        view_end_ms: i64,
    },
    DragStarted {
        task_id: TaskId,
        mode: DragMode,
    },
    DragUpdated {
        task_id: TaskId,
        start_ms: i64,
        end_ms: i64,
    },
    /// A move or resize was written back to an existing task.
    TaskCommitted {
        mutation: TaskMutation,
    },
    /// A duplicate drag added a task.
    TaskCreated {
        task_id: TaskId,
        source_id: TaskId,
    },
    TaskSplit {
        task_id: TaskId,
        new_task_id: TaskId,
        split_at_ms: i64,
    },
}

/// Extension hook interface for bounded custom logic.
///
/// Plugins can observe events and read engine context without mutating core
/// internals directly.
pub trait TimelinePlugin: Send {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &PluginEvent, context: PluginContext);
}
