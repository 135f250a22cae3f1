//! Optional hooks layered on top of the engine.
//!
//! Extensions observe engine state; they never mutate it directly.

pub mod plugins;

pub use plugins::{PluginContext, PluginEvent, TimelinePlugin};
