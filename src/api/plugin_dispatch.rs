use tracing::trace;

use crate::core::TimeSource;
use crate::extensions::{PluginContext, PluginEvent};

use super::TimelineEngine;

impl<S: TimeSource> TimelineEngine<S> {
    pub(super) fn plugin_context(&self) -> PluginContext {
        let (view_start_ms, view_end_ms) = self.view_window();
        PluginContext {
            view_mode: self.zoom.mode(),
            zoom_index: self.zoom.index(),
            view_start_ms,
            view_end_ms,
            tasks_len: self.tasks.len(),
            interaction_mode: self.interaction.mode(),
            zone_fallback: self.clock.is_fallback(),
        }
    }

    pub(super) fn emit_plugin_event(&mut self, event: PluginEvent) {
        if self.plugins.is_empty() {
            return;
        }
        let context = self.plugin_context();
        trace!(?event, plugins = self.plugins.len(), "dispatch plugin event");
        for plugin in &mut self.plugins {
            plugin.on_event(&event, context);
        }
    }

    pub(super) fn emit_view_changed(&mut self) {
        let (view_start_ms, view_end_ms) = self.view_window();
        self.emit_plugin_event(PluginEvent::ViewChanged {
            view_start_ms,
            view_end_ms,
        });
    }
}
