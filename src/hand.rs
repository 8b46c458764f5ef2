//! Multi-finger hand built from configuration (std only).
//!
//! [`ExpanderSet`] opens and configures every expander named in a
//! [`HandConfig`]. [`Hand`] borrows the set, builds one motor per finger and
//! runs finger moves concurrently, one scoped thread per moving finger.
//! Fingers sharing a device are serialised by that device's bus mutex.

use std::thread;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use heapless::String;

use crate::config::{ExpanderConfig, HandConfig, Percent, PinRef, Pose};
use crate::error::{ConfigError, Error, GestureError, MotorError, Result};
use crate::expander::{DefaultMutex, ExpanderState, IoExpander, Row, VirtualPin};
use crate::gesture::GestureRegistry;
use crate::motor::{StepperMotor, StepperMotorBuilder, StopSignal};

/// Pin handle type used by hand-built motors.
pub type HandPin<'a, I2C> = VirtualPin<'a, I2C, DefaultMutex<ExpanderState<I2C>>>;

/// Motor type used for each finger.
pub type FingerMotor<'a, I2C, D> = StepperMotor<HandPin<'a, I2C>, HandPin<'a, I2C>, D>;

fn name32(s: &str) -> String<32> {
    String::try_from(s).unwrap_or_default()
}

/// The configured expanders of a hand, by name.
pub struct ExpanderSet<I2C> {
    devices: Vec<(String<32>, IoExpander<I2C>)>,
}

impl<I2C> ExpanderSet<I2C>
where
    I2C: I2c,
{
    /// Open every expander in `config` and commit its pin directions.
    ///
    /// `open` is called once per expander, in configuration order, to obtain
    /// its transport. Switch pins are configured as inputs and every other pin
    /// as an output.
    ///
    /// # Errors
    ///
    /// Returns the first error from `open` or from committing directions.
    pub fn open<F>(config: &HandConfig, mut open: F) -> Result<Self>
    where
        F: FnMut(&str, &ExpanderConfig) -> Result<I2C>,
    {
        let plan = config.direction_plan();
        let mut devices = Vec::with_capacity(config.expanders.len());

        for (name, device) in config.expanders.iter() {
            let i2c = open(name.as_str(), device)?;
            let mut expander = IoExpander::with_address(i2c, device.bus, device.address);
            if let Some(rows) = plan.get(name) {
                for row in Row::ALL {
                    expander.set_row_io(row, rows[row.index()]);
                }
            }
            expander.configure_io()?;
            info!(
                "expander '{}' ready on bus {} at {:#x}",
                name.as_str(),
                device.bus,
                device.address
            );
            devices.push((name.clone(), expander));
        }

        Ok(Self { devices })
    }

    /// Get an expander by name.
    pub fn get(&self, name: &str) -> Option<&IoExpander<I2C>> {
        self.devices
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// List all expander names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.devices.iter().map(|(k, _)| k.as_str())
    }

    /// Issue the handle for a configured pin of `finger`.
    pub fn pin(&self, finger: &str, pin: &PinRef) -> Result<HandPin<'_, I2C>> {
        let expander = self.get(pin.expander.as_str()).ok_or_else(|| {
            Error::Config(ConfigError::ExpanderNotFound {
                motor: name32(finger),
                expander: pin.expander.clone(),
            })
        })?;
        Ok(expander.get_pin(pin.row, pin.pin)?)
    }

    /// Give back the transports, in configuration order.
    pub fn release(self) -> Vec<(String<32>, I2C)> {
        self.devices
            .into_iter()
            .map(|(name, expander)| (name, expander.release()))
            .collect()
    }
}

/// Named finger motors and gestures.
pub struct Hand<'a, I2C, D>
where
    I2C: I2c,
{
    fingers: Vec<(String<32>, FingerMotor<'a, I2C, D>)>,
    gestures: GestureRegistry,
    stop: StopSignal,
}

impl<'a, I2C, D> Hand<'a, I2C, D>
where
    I2C: I2c + Send,
    D: DelayNs + Send,
{
    /// Build one motor per configured finger.
    ///
    /// `delay` is called once per finger to obtain its delay provider. All
    /// motors share one stop signal, see [`stop_signal`](Self::stop_signal).
    /// Motors start uncalibrated; call [`calibrate`](Self::calibrate).
    ///
    /// # Errors
    ///
    /// Fails on a missing pin or expander, or a gesture with no poses.
    pub fn from_config<F>(
        config: &HandConfig,
        expanders: &'a ExpanderSet<I2C>,
        mut delay: F,
    ) -> Result<Self>
    where
        F: FnMut(&str) -> D,
    {
        let stop = StopSignal::new();
        let mut fingers = Vec::with_capacity(config.motors.len());

        for (finger, motor) in config.motors.iter() {
            let name = finger.as_str();
            let coils = [
                expanders.pin(name, &motor.coils[0])?,
                expanders.pin(name, &motor.coils[1])?,
                expanders.pin(name, &motor.coils[2])?,
                expanders.pin(name, &motor.coils[3])?,
            ];
            let switch = expanders.pin(name, &motor.switch)?;

            let motor = StepperMotorBuilder::new()
                .coils(coils)
                .switch_pin(switch)
                .delay(delay(name))
                .from_config(config, name)?
                .stop_signal(stop.clone())
                .build()?;
            fingers.push((finger.clone(), motor));
        }

        Ok(Self {
            fingers,
            gestures: GestureRegistry::from_config(config)?,
            stop,
        })
    }

    /// Get a finger motor by name.
    pub fn finger(&self, name: &str) -> Option<&FingerMotor<'a, I2C, D>> {
        self.fingers
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// Get a finger motor by name for direct control.
    pub fn finger_mut(&mut self, name: &str) -> Option<&mut FingerMotor<'a, I2C, D>> {
        self.fingers
            .iter_mut()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// List all finger names.
    pub fn finger_names(&self) -> impl Iterator<Item = &str> {
        self.fingers.iter().map(|(k, _)| k.as_str())
    }

    /// The gestures this hand can perform.
    pub fn gestures(&self) -> &GestureRegistry {
        &self.gestures
    }

    /// Register an extra gesture.
    pub fn gestures_mut(&mut self) -> &mut GestureRegistry {
        &mut self.gestures
    }

    /// Signal shared by every finger. Requesting it makes in-flight moves
    /// fail with `Interrupted` after their current partial step.
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Home every finger concurrently.
    ///
    /// # Errors
    ///
    /// Every finger runs to completion; the first error in finger order is
    /// returned.
    pub fn calibrate(&mut self) -> Result<()> {
        info!("calibrating {} fingers", self.fingers.len());
        let jobs: Vec<&mut FingerMotor<'a, I2C, D>> =
            self.fingers.iter_mut().map(|(_, motor)| motor).collect();
        concurrently(jobs, |motor| motor.init())
    }

    /// Move one finger to `percent` of its travel.
    pub fn set_position(&mut self, finger: &str, percent: Percent) -> Result<()> {
        let motor = self.finger_mut(finger).ok_or_else(|| {
            Error::Config(ConfigError::MotorNotFound(name32(finger)))
        })?;
        motor.move_to_percent(percent)
    }

    /// Move every finger named in `pose` concurrently.
    pub fn apply_pose(&mut self, pose: &Pose) -> Result<()> {
        self.apply_pose_for("", pose)
    }

    /// Run a registered gesture, one pose after another.
    ///
    /// # Errors
    ///
    /// `GestureError::NotFound` for an unknown gesture; otherwise stops at the
    /// first pose that fails.
    pub fn perform(&mut self, gesture: &str) -> Result<()> {
        let poses = self.gestures.require(gesture)?.poses.clone();
        info!("performing '{}' ({} poses)", gesture, poses.len());
        for pose in poses.iter() {
            self.apply_pose_for(gesture, pose)?;
        }
        Ok(())
    }

    /// Return every finger home and drive its coils low, concurrently. Pins
    /// go back to their expanders.
    pub fn cleanup(self) -> Result<()> {
        info!("cleanup");
        let jobs: Vec<FingerMotor<'a, I2C, D>> =
            self.fingers.into_iter().map(|(_, motor)| motor).collect();
        concurrently(jobs, |motor| motor.cleanup().map(|_| ()).map_err(|(_, e)| e))
    }

    fn apply_pose_for(&mut self, gesture: &str, pose: &Pose) -> Result<()> {
        if let Some(unknown) = pose.keys().find(|f| self.finger(f.as_str()).is_none()) {
            return Err(Error::Gesture(GestureError::UnknownFinger {
                gesture: name32(gesture),
                finger: unknown.clone(),
            }));
        }

        let jobs: Vec<(&mut FingerMotor<'a, I2C, D>, Percent)> = self
            .fingers
            .iter_mut()
            .filter_map(|(name, motor)| pose.get(&*name).map(|&target| (motor, target)))
            .collect();
        concurrently(jobs, |(motor, target)| motor.move_to_percent(target))
    }
}

/// Run `op` on every job in its own scoped thread and wait for all of them.
/// Returns the first error in job order.
fn concurrently<T, F>(jobs: Vec<T>, op: F) -> Result<()>
where
    T: Send,
    F: Fn(T) -> Result<()> + Sync,
{
    let op = &op;
    let results: Vec<Result<()>> = thread::scope(|s| {
        let handles: Vec<_> = jobs
            .into_iter()
            .map(|job| s.spawn(move || op(job)))
            .collect();
        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|_| Err(MotorError::TaskPanicked.into()))
            })
            .collect()
    });

    for result in results {
        result?;
    }
    Ok(())
}
