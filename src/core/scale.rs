use serde::{Deserialize, Serialize};

use crate::core::zoom::ZoomConfig;
use crate::error::{TimelineError, TimelineResult};

/// Linear mapping between epoch milliseconds and timeline pixels.
///
/// `origin_ms` maps to pixel `0`. Snapping is anchored at the origin so that
/// snapped values stay aligned with grid ticks in the view's zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridScale {
    origin_ms: i64,
    px_per_ms: f64,
    snap_ms: i64,
}

impl GridScale {
    pub fn new(origin_ms: i64, zoom: ZoomConfig) -> TimelineResult<Self> {
        let zoom = zoom.validate()?;
        Ok(Self {
            origin_ms,
            px_per_ms: zoom.pixel_width / zoom.tick_ms() as f64,
            snap_ms: zoom.snap_ms(),
        })
    }

    pub fn from_parts(origin_ms: i64, px_per_ms: f64, snap_ms: i64) -> TimelineResult<Self> {
        if !px_per_ms.is_finite() || px_per_ms <= 0.0 {
            return Err(TimelineError::InvalidData(
                "pixels per millisecond must be finite and > 0".to_owned(),
            ));
        }
        if snap_ms <= 0 {
            return Err(TimelineError::InvalidData(
                "snap granularity must be > 0".to_owned(),
            ));
        }
        Ok(Self {
            origin_ms,
            px_per_ms,
            snap_ms,
        })
    }

    #[must_use]
    pub fn origin_ms(self) -> i64 {
        self.origin_ms
    }

    #[must_use]
    pub fn px_per_ms(self) -> f64 {
        self.px_per_ms
    }

    #[must_use]
    pub fn ms_per_px(self) -> f64 {
        1.0 / self.px_per_ms
    }

    #[must_use]
    pub fn snap_ms(self) -> i64 {
        self.snap_ms
    }

    #[must_use]
    pub fn time_to_px(self, time_ms: i64) -> f64 {
        time_ms.saturating_sub(self.origin_ms) as f64 * self.px_per_ms
    }

    #[must_use]
    pub fn duration_to_px(self, duration_ms: i64) -> f64 {
        duration_ms as f64 * self.px_per_ms
    }

    #[must_use]
    pub fn px_to_time(self, px: f64) -> i64 {
        self.origin_ms.saturating_add(self.px_delta_to_ms(px))
    }

    #[must_use]
    pub fn px_delta_to_ms(self, delta_px: f64) -> i64 {
        (delta_px * self.ms_per_px()).round() as i64
    }

    /// Rounds `time_ms` to the nearest snap boundary measured from the origin.
    #[must_use]
    pub fn snap(self, time_ms: i64) -> i64 {
        let offset = time_ms.saturating_sub(self.origin_ms);
        let steps = (offset as f64 / self.snap_ms as f64).round() as i64;
        self.origin_ms
            .saturating_add(steps.saturating_mul(self.snap_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::GridScale;
    use crate::core::types::{MS_PER_HOUR, MS_PER_MINUTE};
    use crate::core::zoom::{ZoomConfig, ZoomUnit};

    #[test]
    fn snap_is_anchored_at_origin() {
        // Origin at a half-hour offset, as in zones like Asia/Kolkata.
        let origin = 30 * MS_PER_MINUTE;
        let scale =
            GridScale::new(origin, ZoomConfig::new(ZoomUnit::Hour, 1, 60.0)).expect("scale");

        assert_eq!(scale.snap(origin + 2 * MS_PER_HOUR + 20 * MS_PER_MINUTE), origin + 2 * MS_PER_HOUR);
        assert_eq!(scale.snap(origin + 2 * MS_PER_HOUR + 40 * MS_PER_MINUTE), origin + 3 * MS_PER_HOUR);
        assert_eq!(scale.snap(origin - 50 * MS_PER_MINUTE), origin - MS_PER_HOUR);
    }

    #[test]
    fn coarse_zoom_snaps_to_whole_hours() {
        let scale = GridScale::new(0, ZoomConfig::new(ZoomUnit::Day, 1, 140.0)).expect("scale");
        assert_eq!(scale.snap_ms(), MS_PER_HOUR);
        assert_eq!(scale.snap(5 * MS_PER_HOUR + 31 * MS_PER_MINUTE), 6 * MS_PER_HOUR);
    }

    #[test]
    fn extreme_inputs_saturate() {
        let scale = GridScale::new(0, ZoomConfig::new(ZoomUnit::Minute, 15, 40.0)).expect("scale");
        assert_eq!(scale.px_to_time(1e30), i64::MAX);
        assert_eq!(scale.px_to_time(-1e30), i64::MIN);
        assert!(scale.snap(i64::MAX - 1) > 0);
        assert!(scale.time_to_px(i64::MIN).is_finite());
    }

    #[test]
    fn rejects_invalid_parts() {
        assert!(GridScale::from_parts(0, 0.0, MS_PER_HOUR).is_err());
        assert!(GridScale::from_parts(0, f64::NAN, MS_PER_HOUR).is_err());
        assert!(GridScale::from_parts(0, 1.0, 0).is_err());
    }
}
