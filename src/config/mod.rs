//! Configuration module for finger-drive.
//!
//! Provides types for loading and validating expander, motor and gesture
//! configurations from TOML files (with `std` feature) or pre-parsed data.

mod expander;
mod gesture;
mod motor;
mod pin;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use expander::ExpanderConfig;
pub use gesture::{GestureConfig, Pose};
pub use motor::MotorConfig;
pub use pin::PinRef;
pub use system::{DirectionPlan, HandConfig};
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

pub use units::Percent;
