use approx::assert_relative_eq;
use timeline_rs::core::{GridScale, MS_PER_HOUR, TaskMutation, TimeInterval, ZoomConfig, ZoomUnit};
use timeline_rs::interaction::{DragMode, InteractionController};

const NY_JUN_12_MIDNIGHT: i64 = 1_718_164_800_000;

fn hourly_scale() -> GridScale {
    GridScale::new(NY_JUN_12_MIDNIGHT, ZoomConfig::new(ZoomUnit::Hour, 1, 60.0)).expect("scale")
}

fn task_9_to_11() -> TimeInterval {
    TimeInterval::new(
        "t1",
        NY_JUN_12_MIDNIGHT + 9 * MS_PER_HOUR,
        NY_JUN_12_MIDNIGHT + 11 * MS_PER_HOUR,
    )
}

#[test]
fn split_at_quarter_past_ten_divides_durations() {
    let mut controller = InteractionController::default();
    // 10:15 is 10.25 hours at 60 px per hour.
    let outcome = controller
        .blade_split(&task_9_to_11(), "Deep work", 615.0, hourly_scale(), |_| false)
        .expect("split accepted");

    let split_at = NY_JUN_12_MIDNIGHT + 10 * MS_PER_HOUR + 15 * 60_000;
    assert_eq!(outcome.split_at_ms, split_at);
    match outcome.original {
        TaskMutation::Update {
            ref id,
            scheduled_start_ms,
            duration_hours,
            due_date_ms,
        } => {
            assert_eq!(id.as_str(), "t1");
            assert_eq!(scheduled_start_ms, NY_JUN_12_MIDNIGHT + 9 * MS_PER_HOUR);
            assert_relative_eq!(duration_hours, 1.25);
            assert_eq!(due_date_ms, split_at);
        }
        ref other => panic!("unexpected mutation: {other:?}"),
    }

    assert_eq!(outcome.created.scheduled_start_ms, split_at);
    assert_relative_eq!(outcome.created.duration_hours, 0.75);
    assert_eq!(outcome.created.title, "Deep work (part 2)");
    assert_eq!(outcome.created.source_id.as_str(), "t1");
}

#[test]
fn clicks_within_one_second_of_an_edge_are_rejected() {
    let mut controller = InteractionController::default();
    let scale = GridScale::from_parts(0, 1.0, 1).expect("1 px per ms");
    let task = TimeInterval::new("t", 0, 10_000);

    assert!(controller.blade_split(&task, "T", 1_000.0, scale, |_| false).is_none());
    assert!(controller.blade_split(&task, "T", 9_000.0, scale, |_| false).is_none());
    assert!(controller.blade_split(&task, "T", 1_001.0, scale, |_| false).is_some());
    assert!(controller.blade_split(&task, "T", 8_999.0, scale, |_| false).is_some());
}

#[test]
fn split_is_ignored_while_dragging() {
    let mut controller = InteractionController::default();
    controller.pointer_down(&task_9_to_11(), "T", DragMode::Move, 540.0, false);
    assert!(controller
        .blade_split(&task_9_to_11(), "T", 615.0, hourly_scale(), |_| false)
        .is_none());
}

#[test]
fn split_does_not_snap_to_grid() {
    let mut controller = InteractionController::default();
    // 10:07 is between ticks.
    let outcome = controller
        .blade_split(&task_9_to_11(), "T", 607.0, hourly_scale(), |_| false)
        .expect("split accepted");
    assert_eq!(
        outcome.split_at_ms,
        NY_JUN_12_MIDNIGHT + 10 * MS_PER_HOUR + 7 * 60_000
    );
}
