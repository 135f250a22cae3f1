use tracing::{debug, warn};

use crate::core::{
    DependencyMap, SystemTimeSource, TaskRecord, TimeSource, TimeZoneClock, ZoomState,
};
use crate::error::TimelineResult;
use crate::extensions::TimelinePlugin;
use crate::interaction::InteractionController;

use super::TimelineEngineConfig;
use super::validation::validate_config;

/// Main orchestration facade consumed by host applications.
///
/// `TimelineEngine` owns the zone clock, the view state, the working copy of
/// the task list and the drag controller. Every call to `frame()` re-derives
/// the grid, lanes, bars, gaps and connectors from that state.
pub struct TimelineEngine<S: TimeSource = SystemTimeSource> {
    pub(super) clock: TimeZoneClock<S>,
    pub(super) config: TimelineEngineConfig,
    pub(super) zoom: ZoomState,
    pub(super) anchor_ms: i64,
    pub(super) tasks: Vec<TaskRecord>,
    pub(super) dependencies: DependencyMap,
    pub(super) interaction: InteractionController,
    pub(super) plugins: Vec<Box<dyn TimelinePlugin>>,
}

impl<S: TimeSource> TimelineEngine<S> {
    /// Creates an engine reading "now" from `source`.
    pub fn new(source: S, config: TimelineEngineConfig) -> TimelineResult<Self> {
        validate_config(&config)?;

        let clock = TimeZoneClock::new(&config.time_zone, source);
        if clock.is_fallback() {
            warn!(time_zone = %config.time_zone, "engine starting on UTC fallback");
        }
        let anchor_ms = config.anchor_ms.unwrap_or_else(|| clock.now_ms());
        let zoom = ZoomState::new(config.view_mode, &config.zoom_presets);
        let interaction = InteractionController::new(config.snap_to_grid);
        debug!(
            time_zone = clock.zone_id(),
            view_mode = ?config.view_mode,
            anchor_ms,
            "timeline engine initialized"
        );

        Ok(Self {
            clock,
            config,
            zoom,
            anchor_ms,
            tasks: Vec::new(),
            dependencies: DependencyMap::new(),
            interaction,
            plugins: Vec::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &TimelineEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn clock(&self) -> &TimeZoneClock<S> {
        &self.clock
    }

    /// Mutable access to the time source, e.g. to advance a fixed clock in tests.
    pub fn time_source_mut(&mut self) -> &mut S {
        self.clock.source_mut()
    }
}

impl TimelineEngine<SystemTimeSource> {
    /// Creates an engine on the system wall clock.
    pub fn with_system_clock(config: TimelineEngineConfig) -> TimelineResult<Self> {
        Self::new(SystemTimeSource, config)
    }
}
