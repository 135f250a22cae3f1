pub mod clock;
pub mod dependency;
pub mod geometry;
pub mod grid;
pub mod lanes;
pub mod scale;
pub mod task;
pub mod types;
pub mod zoom;

pub use clock::{FixedTimeSource, Period, SystemTimeSource, TimeSource, TimeZoneClock};
pub use dependency::{CONNECTOR_MIN_CURVE_PX, Connector, DependencyMap, project_dependencies};
pub use geometry::{BarGeometry, LaneMetrics, project_bars};
pub use grid::{GridBuilder, GridColumn, MAX_GRID_COLUMNS, TimelineGrid};
pub use lanes::{
    Gap, LaneLayout, LanePlacement, MIN_GAP_MS, MIN_VISIBLE_LANES, detect_gaps, pack_lanes,
};
pub use scale::GridScale;
pub use task::{DEFAULT_SCHEDULED_DURATION_MS, NewTask, TaskMutation, TaskRecord};
pub use types::{
    MIN_TASK_DURATION_MS, MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND, MS_PER_WEEK,
    Point, TaskId, TimeInterval, hours_to_ms, ms_to_hours,
};
pub use zoom::{ViewMode, ZoomConfig, ZoomLevels, ZoomPresets, ZoomState, ZoomUnit};
