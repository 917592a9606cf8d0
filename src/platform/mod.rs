//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (key names to logical actions)

pub mod input;

pub use input::{KeyBindings, KeyTracker};
