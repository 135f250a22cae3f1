use std::collections::HashSet;

use crate::core::TaskRecord;
use crate::error::{TimelineError, TimelineResult};

use super::TimelineEngineConfig;

pub(super) fn validate_viewport_width(width_px: f64) -> TimelineResult<f64> {
    if !width_px.is_finite() || width_px <= 0.0 {
        return Err(TimelineError::InvalidViewport { width: width_px });
    }
    Ok(width_px)
}

pub(super) fn validate_pointer_x(pointer_x: f64) -> TimelineResult<f64> {
    if !pointer_x.is_finite() {
        return Err(TimelineError::InvalidData(
            "pointer x must be finite".to_owned(),
        ));
    }
    Ok(pointer_x)
}

pub(super) fn validate_config(config: &TimelineEngineConfig) -> TimelineResult<()> {
    validate_viewport_width(config.viewport_width_px)?;
    config.lane_metrics.validate()?;
    config.zoom_presets.validate()?;
    Ok(())
}

/// Checks every record and rejects duplicate ids.
pub(super) fn validate_tasks(tasks: &[TaskRecord]) -> TimelineResult<()> {
    let mut seen = HashSet::with_capacity(tasks.len());
    for task in tasks {
        task.validate()?;
        if !seen.insert(task.id.as_str()) {
            return Err(TimelineError::InvalidData(format!(
                "duplicate task id `{}`",
                task.id
            )));
        }
    }
    Ok(())
}
