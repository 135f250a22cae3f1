use timeline_rs::core::{MIN_GAP_MS, MIN_VISIBLE_LANES, MS_PER_HOUR, MS_PER_MINUTE, TimeInterval, pack_lanes};

const NINE: i64 = 9 * MS_PER_HOUR;

#[test]
fn overlapping_interval_opens_second_lane() {
    let layout = pack_lanes(&[
        TimeInterval::new("a", NINE, NINE + MS_PER_HOUR),
        TimeInterval::new("b", NINE + 30 * MS_PER_MINUTE, NINE + 90 * MS_PER_MINUTE),
    ]);

    assert_eq!(layout.lane_of(&"a".into()), Some(0));
    assert_eq!(layout.lane_of(&"b".into()), Some(1));
    assert_eq!(layout.lanes_used, 2);
    assert_eq!(layout.lane_count(), MIN_VISIBLE_LANES);
}

#[test]
fn touching_intervals_share_a_lane() {
    let layout = pack_lanes(&[
        TimeInterval::new("a", NINE, NINE + MS_PER_HOUR),
        TimeInterval::new("b", NINE + MS_PER_HOUR, NINE + 2 * MS_PER_HOUR),
    ]);
    assert_eq!(layout.lanes_used, 1);
    assert!(layout.gaps.is_empty());
}

#[test]
fn first_fit_reuses_lowest_free_lane() {
    let layout = pack_lanes(&[
        TimeInterval::new("a", 0, 100),
        TimeInterval::new("b", 10, 50),
        TimeInterval::new("c", 60, 200),
        TimeInterval::new("d", 20, 30),
    ]);
    // a: lane 0, b: lane 1, d: lane 2, c: lane 1 (b ended at 50).
    assert_eq!(layout.lane_of(&"d".into()), Some(2));
    assert_eq!(layout.lane_of(&"c".into()), Some(1));
    assert_eq!(layout.lanes_used, 3);
}

#[test]
fn input_order_does_not_matter_for_lane_count() {
    let intervals = vec![
        TimeInterval::new("late", 500, 600),
        TimeInterval::new("early", 0, 550),
        TimeInterval::new("mid", 100, 200),
    ];
    let layout = pack_lanes(&intervals);
    assert_eq!(layout.placements[0].id.as_str(), "early");
    assert_eq!(layout.lanes_used, 2);
}

#[test]
fn gaps_are_reported_only_when_longer_than_threshold() {
    let layout = pack_lanes(&[
        TimeInterval::new("a", NINE, NINE + MS_PER_HOUR),
        TimeInterval::new("b", NINE + MS_PER_HOUR + MIN_GAP_MS, NINE + 2 * MS_PER_HOUR),
        TimeInterval::new("c", NINE + 3 * MS_PER_HOUR, NINE + 4 * MS_PER_HOUR),
    ]);

    assert_eq!(layout.lanes_used, 1);
    assert_eq!(layout.gaps.len(), 1);
    let gap = layout.gaps[0];
    assert_eq!(gap.lane_index, 0);
    assert_eq!(gap.start_ms, NINE + 2 * MS_PER_HOUR);
    assert_eq!(gap.end_ms, NINE + 3 * MS_PER_HOUR);
    assert_eq!(gap.duration_ms(), MS_PER_HOUR);
}

#[test]
fn empty_input_still_presents_minimum_lanes() {
    let layout = pack_lanes(&[]);
    assert!(layout.placements.is_empty());
    assert_eq!(layout.lanes_used, 0);
    assert_eq!(layout.lane_count(), MIN_VISIBLE_LANES);
}

#[test]
fn more_than_minimum_lanes_are_all_presented() {
    let intervals: Vec<TimeInterval> = (0..7)
        .map(|i| TimeInterval::new(format!("t{i}"), 0, 1_000 + i))
        .collect();
    let layout = pack_lanes(&intervals);
    assert_eq!(layout.lanes_used, 7);
    assert_eq!(layout.lane_count(), 7);
}
