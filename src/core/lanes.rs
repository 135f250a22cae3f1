use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::types::{MS_PER_MINUTE, TaskId, TimeInterval};

/// Lanes always shown, even when fewer are occupied.
pub const MIN_VISIBLE_LANES: usize = 5;

/// Idle spans must be strictly longer than this to be reported as gaps.
pub const MIN_GAP_MS: i64 = 5 * MS_PER_MINUTE;

/// Lane assigned to one interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanePlacement {
    pub id: TaskId,
    pub lane_index: usize,
    pub start_ms: i64,
    pub end_ms: i64,
}

/// Idle span between two consecutive intervals of the same lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gap {
    pub lane_index: usize,
    pub start_ms: i64,
    pub end_ms: i64,
}

impl Gap {
    #[must_use]
    pub fn duration_ms(self) -> i64 {
        self.end_ms.saturating_sub(self.start_ms)
    }
}

/// Result of one packing pass.
///
/// `placements` follow placement order (start ascending, ties in input order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LaneLayout {
    pub placements: Vec<LanePlacement>,
    pub gaps: Vec<Gap>,
    /// Lanes actually occupied by at least one interval.
    pub lanes_used: usize,
}

impl LaneLayout {
    /// Lane count to present: occupied lanes with a floor of `MIN_VISIBLE_LANES`.
    #[must_use]
    pub fn lane_count(&self) -> usize {
        self.lanes_used.max(MIN_VISIBLE_LANES)
    }

    #[must_use]
    pub fn lane_of(&self, id: &TaskId) -> Option<usize> {
        self.placements
            .iter()
            .find(|placement| &placement.id == id)
            .map(|placement| placement.lane_index)
    }
}

/// Packs intervals into the fewest lanes with greedy first-fit.
///
/// Intervals are visited by start time (stable, so equal starts keep input
/// order). Each goes to the lowest lane whose last occupant ended at or before
/// its start; otherwise a new lane is opened. On start-sorted input this uses
/// exactly as many lanes as the largest set of mutually overlapping intervals.
#[must_use]
pub fn pack_lanes(intervals: &[TimeInterval]) -> LaneLayout {
    if intervals.is_empty() {
        return LaneLayout::default();
    }

    let mut order: Vec<&TimeInterval> = intervals.iter().collect();
    order.sort_by_key(|interval| interval.start_ms);

    let mut lane_last_end: SmallVec<[i64; 8]> = SmallVec::new();
    let mut placements = Vec::with_capacity(order.len());
    for interval in order {
        let lane_index = allocate_lane(&mut lane_last_end, interval.start_ms, interval.end_ms);
        placements.push(LanePlacement {
            id: interval.id.clone(),
            lane_index,
            start_ms: interval.start_ms,
            end_ms: interval.end_ms,
        });
    }

    let gaps = detect_gaps(&placements, lane_last_end.len());
    LaneLayout {
        placements,
        gaps,
        lanes_used: lane_last_end.len(),
    }
}

fn allocate_lane(last_end: &mut SmallVec<[i64; 8]>, start_ms: i64, end_ms: i64) -> usize {
    for (lane, lane_last_end) in last_end.iter_mut().enumerate() {
        if *lane_last_end <= start_ms {
            *lane_last_end = end_ms;
            return lane;
        }
    }
    last_end.push(end_ms);
    last_end.len() - 1
}

/// Reports idle spans longer than `MIN_GAP_MS` between neighbours of each lane.
///
/// `placements` must already be in start order, as produced by `pack_lanes`.
#[must_use]
pub fn detect_gaps(placements: &[LanePlacement], lane_count: usize) -> Vec<Gap> {
    let mut previous_end: Vec<Option<i64>> = vec![None; lane_count];
    let mut gaps = Vec::new();

    for placement in placements {
        let Some(slot) = previous_end.get_mut(placement.lane_index) else {
            continue;
        };
        if let Some(end_ms) = *slot {
            if placement.start_ms.saturating_sub(end_ms) > MIN_GAP_MS {
                gaps.push(Gap {
                    lane_index: placement.lane_index,
                    start_ms: end_ms,
                    end_ms: placement.start_ms,
                });
            }
        }
        *slot = Some(placement.end_ms);
    }

    gaps.sort_by_key(|gap| (gap.lane_index, gap.start_ms));
    gaps
}
