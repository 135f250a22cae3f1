//! timeline-rs: headless scheduling timeline engine.
//!
//! The engine turns a task list into zone-aware ruler columns, packed lanes,
//! bar geometry, idle gaps and dependency connectors, and turns pointer
//! gestures (move, resize, duplicate, blade split) back into task mutations.
//! Rendering is left to the host.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod telemetry;

pub use api::{TimelineEngine, TimelineEngineConfig, TimelineFrame, TimelineSnapshot};
pub use error::{TimelineError, TimelineResult};
