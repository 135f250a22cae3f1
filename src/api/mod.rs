mod data_controller;
mod engine;
mod engine_config;
mod engine_snapshot;
mod interaction_controller;
mod json_contract;
mod layout_controller;
mod plugin_dispatch;
mod plugin_registry;
mod validation;
mod view_controller;

pub use engine::TimelineEngine;
pub use engine_config::TimelineEngineConfig;
pub use engine_snapshot::TimelineSnapshot;
pub use json_contract::{TIMELINE_SNAPSHOT_JSON_SCHEMA_V1, TimelineSnapshotJsonContractV1};
pub use layout_controller::{PREVIEW_ID_SUFFIX, TimelineFrame};

pub use crate::extensions::{PluginContext, PluginEvent, TimelinePlugin};
