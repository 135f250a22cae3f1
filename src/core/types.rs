use std::fmt;

use serde::{Deserialize, Serialize};

pub const MS_PER_SECOND: i64 = 1_000;
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;
pub const MS_PER_WEEK: i64 = 7 * MS_PER_DAY;

/// Shortest interval the engine will produce from derivation or resizing.
pub const MIN_TASK_DURATION_MS: i64 = 15 * MS_PER_MINUTE;

/// Host-assigned task identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Half-open time span `[start_ms, end_ms)` in Unix epoch milliseconds.
///
/// Invariant: `end_ms > start_ms`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub id: TaskId,
    pub start_ms: i64,
    pub end_ms: i64,
}

impl TimeInterval {
    /// Builds an interval, clamping a non-positive span to one millisecond.
    #[must_use]
    pub fn new(id: impl Into<TaskId>, start_ms: i64, end_ms: i64) -> Self {
        Self {
            id: id.into(),
            start_ms,
            end_ms: end_ms.max(start_ms.saturating_add(1)),
        }
    }

    #[must_use]
    pub fn duration_ms(&self) -> i64 {
        self.end_ms.saturating_sub(self.start_ms)
    }

    #[must_use]
    pub fn overlaps(&self, start_ms: i64, end_ms: i64) -> bool {
        self.start_ms < end_ms && self.end_ms > start_ms
    }

    #[must_use]
    pub fn with_span(&self, start_ms: i64, end_ms: i64) -> Self {
        Self::new(self.id.clone(), start_ms, end_ms)
    }
}

/// Pixel-space point used by connector geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[must_use]
pub fn hours_to_ms(hours: f64) -> i64 {
    (hours * MS_PER_HOUR as f64).round() as i64
}

#[must_use]
pub fn ms_to_hours(ms: i64) -> f64 {
    ms as f64 / MS_PER_HOUR as f64
}
