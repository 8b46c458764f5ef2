//! Error types for finger-drive.
//!
//! Provides unified error handling across configuration, the expander bus,
//! motor control and gesture execution.

use core::convert::Infallible;
use core::fmt;

use crate::expander::{Direction, Row};

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all finger-drive operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Expander bus or pin error
    Expander(ExpanderError),
    /// Motor operation error
    Motor(MotorError),
    /// Gesture lookup or execution error
    Gesture(GestureError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Motor references an expander that is not configured
    ExpanderNotFound {
        /// Referencing motor
        motor: heapless::String<32>,
        /// Missing expander name
        expander: heapless::String<32>,
    },
    /// Motor name not found in configuration
    MotorNotFound(heapless::String<32>),
    /// A required builder field was not supplied
    MissingField(&'static str),
    /// The same physical pin is assigned twice
    DuplicatePin {
        /// Expander name
        expander: heapless::String<32>,
        /// Row of the pin
        row: Row,
        /// Pin index
        pin: u8,
    },
    /// Travel bounds are empty or exclude the home position
    InvalidBounds {
        /// Motor name
        motor: heapless::String<32>,
        /// Minimum bound in partial steps
        min: i64,
        /// Maximum bound in partial steps
        max: i64,
    },
    /// Percentage outside 0-100
    InvalidPercent(u8),
    /// Two expanders share a bus and address
    DuplicateDevice {
        /// Bus number
        bus: u8,
        /// Device address
        address: u8,
    },
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Expander bus and pin errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpanderError {
    /// Row identifier out of range
    InvalidRow(u8),
    /// Pin index out of range (must be 0-7)
    InvalidPin(u8),
    /// Write to an input pin or read of an output pin
    Capability {
        /// Device address
        address: u8,
        /// Row of the pin
        row: Row,
        /// Pin index
        pin: u8,
        /// Capability the pin actually has
        direction: Direction,
    },
    /// Pin requested before directions were committed to the device
    NotConfigured,
    /// A handle to this pin is already live
    PinTaken {
        /// Row of the pin
        row: Row,
        /// Pin index
        pin: u8,
    },
    /// Transport failure reported by the I2C implementation
    Bus {
        /// Device address
        address: u8,
        /// HAL error classification
        kind: embedded_hal::i2c::ErrorKind,
    },
}

/// Motor operation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotorError {
    /// Motion requested before the motor was homed
    NotHomed,
    /// Homing gave up before the limit switch triggered
    HomingStalled {
        /// Backward partial steps issued while searching
        steps: u32,
    },
    /// Bounds are empty or exclude the home position
    InvalidBounds {
        /// Requested minimum
        min: i64,
        /// Requested maximum
        max: i64,
    },
    /// New bounds would exclude the current position
    PositionOutsideBounds {
        /// Current position in partial steps
        position: i64,
        /// Requested minimum
        min: i64,
        /// Requested maximum
        max: i64,
    },
    /// Motion stopped on request after finishing the step in flight
    Interrupted,
    /// A concurrent motion task panicked
    TaskPanicked,
}

/// Gesture-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureError {
    /// Gesture name not found
    NotFound(heapless::String<32>),
    /// Gesture pose references a finger without a motor
    UnknownFinger {
        /// Gesture name
        gesture: heapless::String<32>,
        /// Referenced finger
        finger: heapless::String<32>,
    },
    /// Gesture has no poses
    Empty(heapless::String<32>),
    /// A fixed-capacity store is full or a name is too long
    Capacity(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Expander(e) => write!(f, "Expander error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
            Error::Gesture(e) => write!(f, "Gesture error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::ExpanderNotFound { motor, expander } => {
                write!(f, "Motor '{}' references unknown expander '{}'", motor, expander)
            }
            ConfigError::MotorNotFound(name) => write!(f, "Motor '{}' not found", name),
            ConfigError::MissingField(field) => write!(f, "{} is required", field),
            ConfigError::DuplicatePin { expander, row, pin } => {
                write!(f, "Pin {}{} on expander '{}' is assigned twice", row, pin, expander)
            }
            ConfigError::InvalidBounds { motor, min, max } => {
                write!(f, "Invalid bounds for '{}': need min ({}) <= 0 < max ({})", motor, min, max)
            }
            ConfigError::InvalidPercent(v) => write!(f, "Invalid percent: {}. Must be 0-100", v),
            ConfigError::DuplicateDevice { bus, address } => {
                write!(f, "Two expanders at bus {} address {:#04x}", bus, address)
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for ExpanderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpanderError::InvalidRow(v) => write!(f, "Invalid row: {}. Must be A/B or 0/1", v),
            ExpanderError::InvalidPin(v) => write!(f, "Invalid pin: {}. Must be 0-7", v),
            ExpanderError::Capability {
                address,
                row,
                pin,
                direction,
            } => write!(
                f,
                "Pin {}{} of device {:#04x} is configured as an {}",
                row, pin, address, direction
            ),
            ExpanderError::NotConfigured => write!(f, "Pin directions not committed yet"),
            ExpanderError::PinTaken { row, pin } => write!(f, "Pin {}{} is already in use", row, pin),
            ExpanderError::Bus { address, kind } => {
                write!(f, "Bus error at device {:#04x}: {:?}", address, kind)
            }
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::NotHomed => write!(f, "Motor not homed"),
            MotorError::HomingStalled { steps } => {
                write!(f, "Limit switch not reached after {} steps", steps)
            }
            MotorError::InvalidBounds { min, max } => {
                write!(f, "Invalid bounds: need min ({}) <= 0 <= max ({})", min, max)
            }
            MotorError::PositionOutsideBounds { position, min, max } => {
                write!(f, "Position {} outside bounds [{}, {}]", position, min, max)
            }
            MotorError::Interrupted => write!(f, "Motion interrupted"),
            MotorError::TaskPanicked => write!(f, "Motion task panicked"),
        }
    }
}

impl fmt::Display for GestureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestureError::NotFound(name) => write!(f, "Gesture '{}' not found", name),
            GestureError::UnknownFinger { gesture, finger } => {
                write!(f, "Gesture '{}' references unknown finger '{}'", gesture, finger)
            }
            GestureError::Empty(name) => write!(f, "Gesture '{}' has no poses", name),
            GestureError::Capacity(what) => write!(f, "Gesture {} capacity exceeded", what),
        }
    }
}

impl embedded_hal::digital::Error for ExpanderError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<ExpanderError> for Error {
    fn from(e: ExpanderError) -> Self {
        Error::Expander(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

impl From<GestureError> for Error {
    fn from(e: GestureError) -> Self {
        Error::Gesture(e)
    }
}

impl From<Infallible> for Error {
    fn from(e: Infallible) -> Self {
        match e {}
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for ExpanderError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}

#[cfg(feature = "std")]
impl std::error::Error for GestureError {}
