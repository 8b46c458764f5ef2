//! Motor module for finger-drive.
//!
//! Provides the four-phase stepper driver, its partial-step position tracking
//! and calibration state.

mod builder;
mod driver;
mod position;
mod sequence;
pub mod state;
#[cfg(feature = "std")]
mod stop;

pub use builder::StepperMotorBuilder;
pub use driver::{StepperMotor, DEFAULT_DELAY_US, DEFAULT_STEPS_PER_REVOLUTION};
pub use position::{Position, Travel};
pub use sequence::{PhaseVector, Sequence, HALF_STEP, SEQUENCE_LEN};
pub use state::MotorState;
#[cfg(feature = "std")]
pub use stop::StopSignal;
