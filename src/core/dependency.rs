use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::geometry::BarGeometry;
use crate::core::types::{Point, TaskId};

/// Minimum horizontal reach of connector control points.
pub const CONNECTOR_MIN_CURVE_PX: f64 = 24.0;

/// `dependent -> [dependencies]`, in host insertion order.
pub type DependencyMap = IndexMap<TaskId, Vec<TaskId>>;

/// Curved link from a dependency's bar to its dependent's bar.
///
/// The curve is the cubic Bézier `start, control_start, control_end, end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connector {
    /// The dependency (drawn from its right edge).
    pub from: TaskId,
    /// The dependent (drawn into its left edge).
    pub to: TaskId,
    pub start: Point,
    pub end: Point,
    pub control_start: Point,
    pub control_end: Point,
    /// The dependency is not completed yet.
    pub is_blocking: bool,
}

/// Maps dependency edges onto bar geometry.
///
/// Edges whose endpoints are not both present in `bars` are dropped. Only
/// direct edges are read, so cyclic maps need no special handling.
/// `is_completed` reports whether a dependency task is done.
pub fn project_dependencies<F>(
    dependencies: &DependencyMap,
    bars: &IndexMap<TaskId, BarGeometry>,
    is_completed: F,
) -> Vec<Connector>
where
    F: Fn(&TaskId) -> bool,
{
    let mut connectors = Vec::new();
    for (dependent_id, dependency_ids) in dependencies {
        let Some(dependent) = bars.get(dependent_id) else {
            continue;
        };
        for dependency_id in dependency_ids {
            let Some(dependency) = bars.get(dependency_id) else {
                continue;
            };
            connectors.push(build_connector(
                dependency,
                dependent,
                !is_completed(dependency_id),
            ));
        }
    }
    connectors
}

fn build_connector(dependency: &BarGeometry, dependent: &BarGeometry, is_blocking: bool) -> Connector {
    let start = Point::new(dependency.right_px(), dependency.center_y());
    let end = Point::new(dependent.left_px, dependent.center_y());
    let reach = ((end.x - start.x).abs() / 2.0).max(CONNECTOR_MIN_CURVE_PX);

    Connector {
        from: dependency.task_id.clone(),
        to: dependent.task_id.clone(),
        start,
        end,
        control_start: Point::new(start.x + reach, start.y),
        control_end: Point::new(end.x - reach, end.y),
        is_blocking,
    }
}
