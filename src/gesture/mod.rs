//! Gesture module for finger-drive.
//!
//! Provides named gesture storage, lookup, and building.

mod builder;
mod registry;

pub use builder::{GestureBuilder, MAX_POSES};
pub use registry::{GestureRegistry, MAX_GESTURES};
