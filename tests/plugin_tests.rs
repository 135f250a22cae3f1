use std::sync::{Arc, Mutex};

use timeline_rs::core::{FixedTimeSource, MS_PER_HOUR, TaskRecord, ViewMode};
use timeline_rs::extensions::{PluginContext, PluginEvent, TimelinePlugin};
use timeline_rs::interaction::DragMode;
use timeline_rs::{TimelineEngine, TimelineEngineConfig};

const NY_JUN_12_MIDNIGHT: i64 = 1_718_164_800_000;

struct RecordingPlugin {
    id: String,
    events: Arc<Mutex<Vec<(PluginEvent, PluginContext)>>>,
}

impl RecordingPlugin {
    fn new(id: impl Into<String>, events: Arc<Mutex<Vec<(PluginEvent, PluginContext)>>>) -> Self {
        Self {
            id: id.into(),
            events,
        }
    }
}

impl TimelinePlugin for RecordingPlugin {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: &PluginEvent, context: PluginContext) {
        self.events
            .lock()
            .expect("events lock")
            .push((event.clone(), context));
    }
}

fn event_kind(event: &PluginEvent) -> &'static str {
    match event {
        PluginEvent::TasksUpdated { .. } => "tasks",
        PluginEvent::ViewChanged { .. } => "view",
        PluginEvent::DragStarted { .. } => "drag_start",
        PluginEvent::DragUpdated { .. } => "drag_update",
        PluginEvent::TaskCommitted { .. } => "committed",
        PluginEvent::TaskCreated { .. } => "created",
        PluginEvent::TaskSplit { .. } => "split",
    }
}

fn engine() -> TimelineEngine<FixedTimeSource> {
    let config =
        TimelineEngineConfig::new("America/New_York").with_anchor_ms(NY_JUN_12_MIDNIGHT);
    TimelineEngine::new(FixedTimeSource::new(NY_JUN_12_MIDNIGHT), config).expect("engine init")
}

#[test]
fn plugin_receives_deterministic_event_sequence() {
    let mut engine = engine();
    let events = Arc::new(Mutex::new(Vec::new()));
    engine
        .register_plugin(Box::new(RecordingPlugin::new("recorder", events.clone())))
        .expect("register plugin");

    engine
        .set_tasks(vec![
            TaskRecord::new("t", "T", 0).scheduled(NY_JUN_12_MIDNIGHT + 9 * MS_PER_HOUR, Some(2.0)),
        ])
        .expect("set tasks");
    engine.set_view_mode(ViewMode::Day);
    engine
        .pointer_down(&"t".into(), DragMode::Move, 540.0, false)
        .expect("pointer down");
    engine.pointer_move(600.0).expect("pointer move");
    engine.pointer_up();
    engine
        .pointer_down(&"t".into(), DragMode::Move, 600.0, true)
        .expect("pointer down");
    engine.pointer_up();
    engine.blade_click(&"t".into(), 630.0).expect("blade");

    let recorded = events.lock().expect("events lock");
    let kinds: Vec<&str> = recorded.iter().map(|(event, _)| event_kind(event)).collect();
    assert_eq!(
        kinds,
        vec![
            "tasks",
            "view",
            "drag_start",
            "drag_update",
            "committed",
            "drag_start",
            "created",
            "split"
        ]
    );
    assert_eq!(recorded[0].1.tasks_len, 1);
    assert_eq!(recorded.last().map(|(_, context)| context.tasks_len), Some(3));
}

#[test]
fn plugin_ids_must_be_unique_and_non_empty() {
    let mut engine = engine();
    let events = Arc::new(Mutex::new(Vec::new()));
    engine
        .register_plugin(Box::new(RecordingPlugin::new("p", events.clone())))
        .expect("first registration");
    assert!(engine
        .register_plugin(Box::new(RecordingPlugin::new("p", events.clone())))
        .is_err());
    assert!(engine
        .register_plugin(Box::new(RecordingPlugin::new("", events)))
        .is_err());

    assert_eq!(engine.plugin_count(), 1);
    assert!(engine.unregister_plugin("p"));
    assert!(!engine.has_plugin("p"));
    assert!(!engine.unregister_plugin("p"));
}

#[test]
fn no_commit_event_when_dragged_task_is_gone() {
    let mut engine = engine();
    let events = Arc::new(Mutex::new(Vec::new()));
    engine
        .register_plugin(Box::new(RecordingPlugin::new("recorder", events.clone())))
        .expect("register plugin");
    engine
        .set_tasks(vec![
            TaskRecord::new("t", "T", 0).scheduled(NY_JUN_12_MIDNIGHT + 9 * MS_PER_HOUR, Some(2.0)),
        ])
        .expect("set tasks");
    engine
        .pointer_down(&"t".into(), DragMode::Move, 540.0, false)
        .expect("pointer down");
    engine.set_tasks(Vec::new()).expect("clear tasks");

    assert!(engine.pointer_up().is_none());
    let recorded = events.lock().expect("events lock");
    let kinds: Vec<&str> = recorded.iter().map(|(event, _)| event_kind(event)).collect();
    assert_eq!(kinds, vec!["tasks", "drag_start", "tasks"]);
}
