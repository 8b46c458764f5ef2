//! # finger-drive
//!
//! Stepper-driven robotic hand control over I2C port expanders, with
//! embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Register-level expander driver**: two 8-pin rows per device, whole-row
//!   commits, capability-checked pin handles
//! - **embedded-hal 1.0**: `I2c` for the expander, `OutputPin`/`InputPin` for
//!   coils and switches, `DelayNs` for step timing
//! - **no_std compatible**: Expander, switch and motor work without the
//!   standard library
//! - **Half-step sequencing**: Bounded partial-step position tracking
//! - **Homing**: Absolute position re-established against a limit switch
//! - **Configuration-driven**: Expanders, finger motors and gestures in TOML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use finger_drive::{ExpanderSet, Hand, Percent};
//!
//! let config = finger_drive::load_config("hand.toml")?;
//!
//! // Open each expander on its bus and commit pin directions
//! let expanders = ExpanderSet::open(&config, |_, device| open_bus(device.bus))?;
//!
//! // One motor per finger, homed together
//! let mut hand = Hand::from_config(&config, &expanders, |_| Delay::new())?;
//! hand.calibrate()?;
//!
//! hand.set_position("index", Percent::new(40)?)?;
//! hand.perform("wave")?;
//! hand.cleanup()?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O, TOML parsing, thread-safe bus
//!   sharing and the multi-finger [`Hand`]
//! - `tracing` (default): Log through `tracing`
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Log through `defmt` for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Must come first so the logging macros are visible to every module.
#[macro_use]
mod fmt;

// Core modules
pub mod config;
pub mod error;
pub mod expander;
pub mod gesture;
pub mod motor;
pub mod switch;

#[cfg(feature = "std")]
pub mod hand;

// Re-exports for ergonomic API
pub use config::{validate_config, HandConfig, MotorConfig, Percent};
pub use error::{Error, Result};
pub use expander::{Direction, IoExpander, PinIndex, Row, VirtualPin};
pub use gesture::{GestureBuilder, GestureRegistry};
pub use motor::{state, MotorState, StepperMotor, StepperMotorBuilder};
pub use switch::LimitSwitch;

#[cfg(feature = "std")]
pub use hand::{ExpanderSet, Hand};
#[cfg(feature = "std")]
pub use motor::StopSignal;

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};
