use timeline_rs::api::{TIMELINE_SNAPSHOT_JSON_SCHEMA_V1, TimelineSnapshotJsonContractV1};
use timeline_rs::core::{FixedTimeSource, MS_PER_HOUR, TaskId, TaskRecord};
use timeline_rs::{TimelineEngine, TimelineEngineConfig, TimelineSnapshot};

const NY_JUN_12_MIDNIGHT: i64 = 1_718_164_800_000;

fn engine() -> TimelineEngine<FixedTimeSource> {
    let config =
        TimelineEngineConfig::new("America/New_York").with_anchor_ms(NY_JUN_12_MIDNIGHT);
    let mut engine = TimelineEngine::new(FixedTimeSource::new(NY_JUN_12_MIDNIGHT), config)
        .expect("engine init");
    engine
        .set_tasks(vec![
            TaskRecord::new("a", "Alpha", 0).scheduled(NY_JUN_12_MIDNIGHT + 9 * MS_PER_HOUR, Some(1.0)),
        ])
        .expect("set tasks");
    engine
}

#[test]
fn snapshot_contract_v1_round_trips() {
    let engine = engine();
    let json = engine
        .snapshot_json_contract_v1_pretty()
        .expect("serialize contract");

    let payload: TimelineSnapshotJsonContractV1 =
        serde_json::from_str(&json).expect("parse payload");
    assert_eq!(payload.schema_version, TIMELINE_SNAPSHOT_JSON_SCHEMA_V1);

    let restored = TimelineSnapshot::from_json_compat_str(&json).expect("compat parse");
    let expected = engine.snapshot().expect("snapshot");
    assert_eq!(restored.anchor_ms, expected.anchor_ms);
    assert_eq!(restored.view_mode, expected.view_mode);
    assert_eq!(restored.frame.grid.columns, expected.frame.grid.columns);
    assert_eq!(restored.frame.gaps, expected.frame.gaps);
    assert_eq!(restored.frame.lane_count, expected.frame.lane_count);
    assert_eq!(restored.task_titles.get(&TaskId::from("a")).map(String::as_str), Some("Alpha"));
}

#[test]
fn bare_snapshot_json_is_accepted() {
    let snapshot = engine().snapshot().expect("snapshot");
    let json = snapshot.to_json_pretty().expect("serialize");
    let restored = TimelineSnapshot::from_json_compat_str(&json).expect("compat parse");
    assert_eq!(restored.frame.bars.len(), 1);
    assert_eq!(restored.time_zone, "America/New_York");
}

#[test]
fn unsupported_schema_version_is_rejected() {
    let snapshot = engine().snapshot().expect("snapshot");
    let payload = TimelineSnapshotJsonContractV1 {
        schema_version: 99,
        snapshot,
    };
    let json = serde_json::to_string(&payload).expect("serialize");
    assert!(TimelineSnapshot::from_json_compat_str(&json).is_err());
}
