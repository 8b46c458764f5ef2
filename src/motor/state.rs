//! Motor calibration states.

/// Calibration state of a motor.
///
/// A freshly built motor is `Uncalibrated`: its position is relative to an
/// arbitrary origin. Homing passes through `Homing` and ends in `Ready`, or
/// falls back to `Uncalibrated` if it fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorState {
    /// Position unknown; motion is refused.
    #[default]
    Uncalibrated,
    /// Searching for the limit switch.
    Homing,
    /// Homed; positions are absolute.
    Ready,
}

impl MotorState {
    /// Get the state name as a static string.
    pub fn name(self) -> &'static str {
        match self {
            MotorState::Uncalibrated => "Uncalibrated",
            MotorState::Homing => "Homing",
            MotorState::Ready => "Ready",
        }
    }
}
