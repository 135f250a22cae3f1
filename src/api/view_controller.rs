use tracing::debug;

use crate::core::{
    GridBuilder, GridScale, TimeSource, TimelineGrid, ViewMode, ZoomConfig,
};
use crate::error::TimelineResult;

use super::TimelineEngine;
use super::validation::validate_viewport_width;

impl<S: TimeSource> TimelineEngine<S> {
    #[must_use]
    pub fn time_zone(&self) -> &str {
        self.clock.zone_id()
    }

    /// Switches the display zone. Unknown ids fall back to UTC.
    pub fn set_time_zone(&mut self, zone_id: &str) {
        self.clock.set_zone(zone_id);
        self.config.time_zone = zone_id.to_owned();
        debug!(
            time_zone = zone_id,
            fallback = self.clock.is_fallback(),
            "time zone changed"
        );
        self.emit_view_changed();
    }

    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.zoom.mode()
    }

    /// Switches view mode and resets zoom to the mode's default level.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.zoom.set_mode(mode, &self.config.zoom_presets);
        self.config.view_mode = mode;
        debug!(view_mode = ?mode, zoom_index = self.zoom.index(), "view mode changed");
        self.emit_view_changed();
    }

    #[must_use]
    pub fn zoom_index(&self) -> usize {
        self.zoom.index()
    }

    #[must_use]
    pub fn active_zoom(&self) -> ZoomConfig {
        self.zoom.active(&self.config.zoom_presets)
    }

    /// Selects a zoom level of the current mode; out-of-range indices clamp.
    pub fn set_zoom_index(&mut self, index: usize) {
        let previous = self.zoom.index();
        self.zoom.set_index(index, &self.config.zoom_presets);
        if self.zoom.index() != previous {
            self.emit_view_changed();
        }
    }

    /// One level finer. Returns `true` when the level changed.
    pub fn zoom_in(&mut self) -> bool {
        let changed = self.zoom.zoom_in();
        if changed {
            self.emit_view_changed();
        }
        changed
    }

    /// One level coarser. Returns `true` when the level changed.
    pub fn zoom_out(&mut self) -> bool {
        let changed = self.zoom.zoom_out(&self.config.zoom_presets);
        if changed {
            self.emit_view_changed();
        }
        changed
    }

    #[must_use]
    pub fn anchor_ms(&self) -> i64 {
        self.anchor_ms
    }

    pub fn set_anchor_ms(&mut self, anchor_ms: i64) {
        self.anchor_ms = anchor_ms;
        self.emit_view_changed();
    }

    /// Re-anchors the view on the current instant.
    pub fn go_to_today(&mut self) {
        let now = self.clock.now_ms();
        self.set_anchor_ms(now);
    }

    /// Moves the view by whole calendar periods of the current mode.
    ///
    /// The anchor lands on the start of the target period.
    pub fn navigate(&mut self, periods: i32) {
        if periods == 0 {
            return;
        }
        let period = self.zoom.mode().period();
        let mut anchor = self.clock.start_of_period(self.anchor_ms, period);
        for _ in 0..periods.unsigned_abs() {
            anchor = if periods > 0 {
                self.clock.next_period_start(anchor, period)
            } else {
                self.clock.start_of_period(anchor - 1, period)
            };
        }
        debug!(periods, anchor_ms = anchor, "navigated view");
        self.set_anchor_ms(anchor);
    }

    #[must_use]
    pub fn viewport_width_px(&self) -> f64 {
        self.config.viewport_width_px
    }

    pub fn set_viewport_width_px(&mut self, width_px: f64) -> TimelineResult<()> {
        self.config.viewport_width_px = validate_viewport_width(width_px)?;
        Ok(())
    }

    #[must_use]
    pub fn snap_to_grid(&self) -> bool {
        self.interaction.snap_enabled()
    }

    pub fn set_snap_to_grid(&mut self, enabled: bool) {
        self.config.snap_to_grid = enabled;
        self.interaction.set_snap_enabled(enabled);
    }

    /// `(start, end)` of the zone-local calendar period being shown.
    #[must_use]
    pub fn view_window(&self) -> (i64, i64) {
        GridBuilder::new(&self.clock).view_window(self.anchor_ms, self.zoom.mode())
    }

    /// Pixel mapping of the current view, without building columns.
    pub fn grid_scale(&self) -> TimelineResult<GridScale> {
        let (view_start, _) = self.view_window();
        GridScale::new(view_start, self.active_zoom())
    }

    pub fn grid(&self) -> TimelineResult<TimelineGrid> {
        GridBuilder::new(&self.clock).build_for_view(
            self.anchor_ms,
            self.zoom.mode(),
            self.active_zoom(),
        )
    }
}
