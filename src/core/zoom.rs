use serde::{Deserialize, Serialize};

use crate::core::clock::Period;
use crate::core::types::{MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_WEEK};
use crate::error::{TimelineError, TimelineResult};

// Used only if an unvalidated preset list turns out empty.
const FALLBACK_ZOOM: ZoomConfig = ZoomConfig::new(ZoomUnit::Hour, 1, 60.0);

/// Time unit represented by one grid tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoomUnit {
    Minute,
    Hour,
    Day,
    Week,
}

impl ZoomUnit {
    #[must_use]
    pub const fn unit_ms(self) -> i64 {
        match self {
            Self::Minute => MS_PER_MINUTE,
            Self::Hour => MS_PER_HOUR,
            Self::Day => MS_PER_DAY,
            Self::Week => MS_PER_WEEK,
        }
    }
}

/// One zoom level: a tick of `step` units drawn `pixel_width` pixels wide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomConfig {
    pub unit: ZoomUnit,
    pub step: u32,
    pub pixel_width: f64,
}

impl ZoomConfig {
    #[must_use]
    pub const fn new(unit: ZoomUnit, step: u32, pixel_width: f64) -> Self {
        Self {
            unit,
            step,
            pixel_width,
        }
    }

    #[must_use]
    pub fn tick_ms(self) -> i64 {
        i64::from(self.step) * self.unit.unit_ms()
    }

    /// Granularity used when snapping dragged edges.
    ///
    /// Fine zooms snap to the configured tick; coarse zooms snap to whole hours.
    #[must_use]
    pub fn snap_ms(self) -> i64 {
        match self.unit {
            ZoomUnit::Minute | ZoomUnit::Hour => self.tick_ms(),
            ZoomUnit::Day | ZoomUnit::Week => MS_PER_HOUR,
        }
    }

    pub fn validate(self) -> TimelineResult<Self> {
        if self.step == 0 {
            return Err(TimelineError::InvalidData(
                "zoom step must be >= 1".to_owned(),
            ));
        }
        if !self.pixel_width.is_finite() || self.pixel_width <= 0.0 {
            return Err(TimelineError::InvalidData(
                "zoom pixel width must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Calendar span shown by the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ViewMode {
    #[default]
    Day,
    Week,
    Month,
}

impl ViewMode {
    #[must_use]
    pub const fn period(self) -> Period {
        match self {
            Self::Day => Period::Day,
            Self::Week => Period::Week,
            Self::Month => Period::Month,
        }
    }
}

/// Ordered zoom levels for one view mode, finest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoomLevels {
    pub levels: Vec<ZoomConfig>,
    pub default_index: usize,
}

impl ZoomLevels {
    #[must_use]
    pub fn new(levels: Vec<ZoomConfig>, default_index: usize) -> Self {
        Self {
            levels,
            default_index,
        }
    }

    fn validate(&self, mode: ViewMode) -> TimelineResult<()> {
        if self.levels.is_empty() {
            return Err(TimelineError::InvalidData(format!(
                "zoom levels for {mode:?} view must not be empty"
            )));
        }
        if self.default_index >= self.levels.len() {
            return Err(TimelineError::InvalidData(format!(
                "default zoom index {} out of range for {mode:?} view ({} levels)",
                self.default_index,
                self.levels.len()
            )));
        }
        for level in &self.levels {
            level.validate()?;
        }
        Ok(())
    }
}

/// Zoom levels declared per view mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoomPresets {
    pub day: ZoomLevels,
    pub week: ZoomLevels,
    pub month: ZoomLevels,
}

impl Default for ZoomPresets {
    fn default() -> Self {
        Self {
            day: ZoomLevels::new(
                vec![
                    ZoomConfig::new(ZoomUnit::Minute, 15, 24.0),
                    ZoomConfig::new(ZoomUnit::Minute, 30, 36.0),
                    ZoomConfig::new(ZoomUnit::Hour, 1, 60.0),
                    ZoomConfig::new(ZoomUnit::Hour, 2, 80.0),
                ],
                2,
            ),
            week: ZoomLevels::new(
                vec![
                    ZoomConfig::new(ZoomUnit::Hour, 3, 24.0),
                    ZoomConfig::new(ZoomUnit::Hour, 6, 36.0),
                    ZoomConfig::new(ZoomUnit::Day, 1, 140.0),
                ],
                2,
            ),
            month: ZoomLevels::new(
                vec![
                    ZoomConfig::new(ZoomUnit::Day, 1, 36.0),
                    ZoomConfig::new(ZoomUnit::Week, 1, 180.0),
                ],
                0,
            ),
        }
    }
}

impl ZoomPresets {
    #[must_use]
    pub fn levels_for(&self, mode: ViewMode) -> &ZoomLevels {
        match mode {
            ViewMode::Day => &self.day,
            ViewMode::Week => &self.week,
            ViewMode::Month => &self.month,
        }
    }

    pub fn validate(&self) -> TimelineResult<()> {
        self.day.validate(ViewMode::Day)?;
        self.week.validate(ViewMode::Week)?;
        self.month.validate(ViewMode::Month)
    }
}

/// Active view mode plus the index of its active zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoomState {
    mode: ViewMode,
    index: usize,
}

impl ZoomState {
    #[must_use]
    pub fn new(mode: ViewMode, presets: &ZoomPresets) -> Self {
        Self {
            mode,
            index: presets.levels_for(mode).default_index,
        }
    }

    #[must_use]
    pub fn mode(self) -> ViewMode {
        self.mode
    }

    #[must_use]
    pub fn index(self) -> usize {
        self.index
    }

    /// Switches view mode and resets to that mode's default zoom level.
    pub fn set_mode(&mut self, mode: ViewMode, presets: &ZoomPresets) {
        self.mode = mode;
        self.index = presets.levels_for(mode).default_index;
    }

    /// Selects a zoom level; out-of-range indices are clamped to the coarsest level.
    pub fn set_index(&mut self, index: usize, presets: &ZoomPresets) {
        let count = presets.levels_for(self.mode).levels.len();
        self.index = index.min(count.saturating_sub(1));
    }

    /// Moves one level finer. Returns `true` when the level changed.
    pub fn zoom_in(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Moves one level coarser. Returns `true` when the level changed.
    pub fn zoom_out(&mut self, presets: &ZoomPresets) -> bool {
        if self.index + 1 >= presets.levels_for(self.mode).levels.len() {
            return false;
        }
        self.index += 1;
        true
    }

    #[must_use]
    pub fn active(self, presets: &ZoomPresets) -> ZoomConfig {
        let levels = &presets.levels_for(self.mode).levels;
        levels
            .get(self.index)
            .or_else(|| levels.last())
            .copied()
            .unwrap_or(FALLBACK_ZOOM)
    }
}

#[cfg(test)]
mod tests {
    use super::{ViewMode, ZoomPresets, ZoomState, ZoomUnit};

    #[test]
    fn switching_mode_resets_to_declared_default() {
        let presets = ZoomPresets::default();
        let mut state = ZoomState::new(ViewMode::Day, &presets);
        assert!(state.zoom_in());
        assert_eq!(state.index(), 1);

        state.set_mode(ViewMode::Week, &presets);
        assert_eq!(state.index(), presets.week.default_index);
        state.set_mode(ViewMode::Day, &presets);
        assert_eq!(state.active(&presets).unit, ZoomUnit::Hour);
    }

    #[test]
    fn zoom_out_stops_at_coarsest_level() {
        let presets = ZoomPresets::default();
        let mut state = ZoomState::new(ViewMode::Month, &presets);
        assert!(state.zoom_out(&presets));
        assert!(!state.zoom_out(&presets));
        assert_eq!(state.active(&presets).unit, ZoomUnit::Week);
    }
}
