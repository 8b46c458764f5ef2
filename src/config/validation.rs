//! Configuration validation.

use heapless::String;

use crate::error::{ConfigError, Error, GestureError, Result};

use super::motor::MotorConfig;
use super::pin::PinRef;
use super::{GestureConfig, HandConfig};

/// Validate a hand configuration.
///
/// Checks:
/// - Every pin references a configured expander
/// - No two expanders share a bus and address
/// - No physical pin is used twice
/// - Bounds satisfy `min <= 0 < max`
/// - Gestures are non-empty and only name configured fingers
pub fn validate_config(config: &HandConfig) -> Result<()> {
    validate_devices(config)?;

    for (name, motor) in config.motors.iter() {
        validate_motor(name.as_str(), motor, config)?;
    }
    validate_pin_usage(config)?;

    for (name, gesture) in config.gestures.iter() {
        validate_gesture(name.as_str(), gesture, config)?;
    }

    Ok(())
}

fn name32(s: &str) -> String<32> {
    String::try_from(s).unwrap_or_default()
}

fn validate_devices(config: &HandConfig) -> Result<()> {
    let devices: heapless::Vec<_, 8> = config.expanders.values().collect();
    for (i, a) in devices.iter().enumerate() {
        if devices[i + 1..]
            .iter()
            .any(|b| a.bus == b.bus && a.address == b.address)
        {
            return Err(Error::Config(ConfigError::DuplicateDevice {
                bus: a.bus,
                address: a.address,
            }));
        }
    }
    Ok(())
}

fn validate_motor(name: &str, motor: &MotorConfig, config: &HandConfig) -> Result<()> {
    for pin in motor.pins() {
        if config.expander(pin.expander.as_str()).is_none() {
            return Err(Error::Config(ConfigError::ExpanderNotFound {
                motor: name32(name),
                expander: pin.expander.clone(),
            }));
        }
    }

    // Home is partial step 0, so it must lie inside the travel.
    if motor.min > 0 || motor.max <= 0 || motor.min >= motor.max {
        return Err(Error::Config(ConfigError::InvalidBounds {
            motor: name32(name),
            min: motor.min,
            max: motor.max,
        }));
    }

    Ok(())
}

fn validate_pin_usage(config: &HandConfig) -> Result<()> {
    // 8 motors x 5 pins.
    let mut seen: heapless::Vec<&PinRef, 40> = heapless::Vec::new();
    for pin in config.motors.values().flat_map(|motor| motor.pins()) {
        if seen.iter().any(|used| used.same_pin(pin)) {
            return Err(Error::Config(ConfigError::DuplicatePin {
                expander: pin.expander.clone(),
                row: pin.row,
                pin: pin.pin.value(),
            }));
        }
        let _ = seen.push(pin);
    }
    Ok(())
}

fn validate_gesture(name: &str, gesture: &GestureConfig, config: &HandConfig) -> Result<()> {
    if gesture.poses.iter().all(|pose| pose.is_empty()) {
        return Err(Error::Gesture(GestureError::Empty(name32(name))));
    }

    for finger in gesture.fingers() {
        if config.motor(finger).is_none() {
            return Err(Error::Gesture(GestureError::UnknownFinger {
                gesture: name32(name),
                finger: name32(finger),
            }));
        }
    }

    Ok(())
}
