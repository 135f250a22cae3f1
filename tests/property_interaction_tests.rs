use proptest::prelude::*;
use timeline_rs::core::{
    GridScale, MIN_TASK_DURATION_MS, TaskMutation, TimeInterval, ZoomConfig, ZoomUnit,
};
use timeline_rs::interaction::{DragMode, InteractionController};

fn zoom_strategy() -> impl Strategy<Value = ZoomConfig> {
    prop_oneof![
        Just(ZoomConfig::new(ZoomUnit::Minute, 15, 24.0)),
        Just(ZoomConfig::new(ZoomUnit::Hour, 1, 60.0)),
        Just(ZoomConfig::new(ZoomUnit::Day, 1, 140.0)),
        Just(ZoomConfig::new(ZoomUnit::Week, 1, 180.0)),
    ]
}

proptest! {
    #[test]
    fn move_preserves_duration_exactly(
        start in 0i64..1_000_000_000,
        len in 1i64..100_000_000,
        anchor_x in -2_000.0f64..2_000.0,
        pointer_x in -2_000.0f64..2_000.0,
        zoom in zoom_strategy(),
        duplicate in any::<bool>()
    ) {
        let scale = GridScale::new(0, zoom).expect("scale");
        let mut controller = InteractionController::default();
        let task = TimeInterval::new("t", start, start + len);
        prop_assert!(controller.pointer_down(&task, "T", DragMode::Move, anchor_x, duplicate));

        let preview = controller.pointer_move(pointer_x, scale).cloned().expect("preview");
        prop_assert_eq!(preview.duration_ms(), len);
        prop_assert_eq!((preview.start_ms - scale.origin_ms()) % scale.snap_ms(), 0);

        let commit = controller.pointer_up(|_| false).expect("commit");
        match commit.mutation {
            TaskMutation::Create(created) => {
                prop_assert!(duplicate);
                prop_assert_eq!(created.source_id.as_str(), "t");
            }
            TaskMutation::Update { id, .. } => {
                prop_assert!(!duplicate);
                prop_assert_eq!(id.as_str(), "t");
            }
        }
    }

    #[test]
    fn resize_never_goes_below_minimum_duration(
        start in 0i64..1_000_000_000,
        len in 1i64..100_000_000,
        pointer_x in -50_000.0f64..50_000.0,
        zoom in zoom_strategy()
    ) {
        let scale = GridScale::new(0, zoom).expect("scale");
        let mut controller = InteractionController::default();
        let task = TimeInterval::new("t", start, start + len);
        controller.pointer_down(&task, "T", DragMode::Resize, 0.0, false);

        let preview = controller.pointer_move(pointer_x, scale).cloned().expect("preview");
        prop_assert_eq!(preview.start_ms, start);
        prop_assert!(preview.duration_ms() >= MIN_TASK_DURATION_MS);
    }
}
