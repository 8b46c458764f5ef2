//! Builder pattern for StepperMotor.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::{HandConfig, MotorConfig};
use crate::error::{ConfigError, Error, Result};
use crate::switch::LimitSwitch;

use super::driver::{StepperMotor, DEFAULT_DELAY_US, DEFAULT_STEPS_PER_REVOLUTION};
#[cfg(feature = "std")]
use super::stop::StopSignal;

/// Builder for creating StepperMotor instances.
pub struct StepperMotorBuilder<P, S, D> {
    coils: Option<[P; 4]>,
    switch_pin: Option<S>,
    delay: Option<D>,
    name: Option<heapless::String<32>>,
    min: i64,
    max: i64,
    delay_us: u32,
    steps_per_revolution: u16,
    homing_max_steps: Option<u32>,
    switch_active_low: bool,
    settle_read: bool,
    end_stop_guard: bool,
    #[cfg(feature = "std")]
    stop: Option<StopSignal>,
}

impl<P, S, D> Default for StepperMotorBuilder<P, S, D>
where
    P: OutputPin,
    S: InputPin,
    D: DelayNs,
    Error: From<P::Error> + From<S::Error>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P, S, D> StepperMotorBuilder<P, S, D>
where
    P: OutputPin,
    S: InputPin,
    D: DelayNs,
    Error: From<P::Error> + From<S::Error>,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            coils: None,
            switch_pin: None,
            delay: None,
            name: None,
            min: 0,
            max: i64::MAX,
            delay_us: DEFAULT_DELAY_US,
            steps_per_revolution: DEFAULT_STEPS_PER_REVOLUTION,
            homing_max_steps: None,
            switch_active_low: false,
            settle_read: false,
            end_stop_guard: false,
            #[cfg(feature = "std")]
            stop: None,
        }
    }

    /// Set the four coil outputs, in phase-table column order.
    pub fn coils(mut self, coils: [P; 4]) -> Self {
        self.coils = Some(coils);
        self
    }

    /// Set the home switch input.
    pub fn switch_pin(mut self, pin: S) -> Self {
        self.switch_pin = Some(pin);
        self
    }

    /// Set the delay provider.
    pub fn delay(mut self, delay: D) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the motor name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = heapless::String::try_from(name).ok();
        self
    }

    /// Set the travel bounds in partial steps.
    pub fn bounds(mut self, min: i64, max: i64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Set the pause after each partial step.
    pub fn delay_us(mut self, delay_us: u32) -> Self {
        self.delay_us = delay_us;
        self
    }

    /// Set full steps per revolution.
    pub fn steps_per_revolution(mut self, steps: u16) -> Self {
        self.steps_per_revolution = steps;
        self
    }

    /// Cap the number of backward steps homing may take.
    pub fn homing_max_steps(mut self, steps: u32) -> Self {
        self.homing_max_steps = Some(steps);
        self
    }

    /// Treat a low switch level as pressed.
    pub fn switch_active_low(mut self, active_low: bool) -> Self {
        self.switch_active_low = active_low;
        self
    }

    /// Discard the first switch read when building.
    pub fn settle_read(mut self, settle: bool) -> Self {
        self.settle_read = settle;
        self
    }

    /// Enable the end-stop guard.
    pub fn end_stop_guard(mut self, enabled: bool) -> Self {
        self.end_stop_guard = enabled;
        self
    }

    /// Attach a shared stop signal.
    #[cfg(feature = "std")]
    pub fn stop_signal(mut self, signal: StopSignal) -> Self {
        self.stop = Some(signal);
        self
    }

    /// Configure from a MotorConfig. Pins are not touched.
    pub fn from_motor_config(mut self, config: &MotorConfig) -> Self {
        self.min = config.min;
        self.max = config.max;
        self.delay_us = config.delay_us;
        self.steps_per_revolution = config.steps_per_revolution;
        self.homing_max_steps = config.homing_max_steps;
        self.switch_active_low = config.switch_active_low;
        self.settle_read = config.settle_read;
        self.end_stop_guard = config.end_stop_guard;
        self
    }

    /// Configure from HandConfig by finger name.
    pub fn from_config(self, config: &HandConfig, finger: &str) -> Result<Self> {
        let motor_config = config.motor(finger).ok_or_else(|| {
            Error::Config(ConfigError::MotorNotFound(
                heapless::String::try_from(finger).unwrap_or_default(),
            ))
        })?;

        Ok(self.from_motor_config(motor_config).name(finger))
    }

    /// Build the StepperMotor.
    ///
    /// The motor starts uncalibrated. With `settle_read` the switch is read
    /// once here.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing, the bounds are
    /// invalid or the settle read fails.
    pub fn build(self) -> Result<StepperMotor<P, S, D>> {
        let coils = self
            .coils
            .ok_or(Error::Config(ConfigError::MissingField("coils")))?;
        let switch_pin = self
            .switch_pin
            .ok_or(Error::Config(ConfigError::MissingField("switch_pin")))?;
        let delay = self
            .delay
            .ok_or(Error::Config(ConfigError::MissingField("delay")))?;

        let mut switch = if self.switch_active_low {
            LimitSwitch::active_low(switch_pin)
        } else {
            LimitSwitch::new(switch_pin)
        };
        if self.settle_read {
            switch = switch.settle()?;
        }

        let mut motor = StepperMotor::new(coils, switch, delay);
        motor.set_bounds(self.min, self.max)?;
        motor.set_delay_us(self.delay_us);
        motor.set_steps_per_revolution(self.steps_per_revolution);
        motor.set_homing_limit(self.homing_max_steps);
        motor.set_end_stop_guard(self.end_stop_guard);
        if let Some(name) = self.name {
            motor.set_name(name);
        } else {
            motor.set_name(heapless::String::try_from("motor").unwrap_or_default());
        }
        #[cfg(feature = "std")]
        {
            if let Some(signal) = self.stop {
                motor.set_stop_signal(signal);
            }
        }

        Ok(motor)
    }
}
