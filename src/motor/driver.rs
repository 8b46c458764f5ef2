//! Stepper motor driver.
//!
//! Drives four coil outputs through a phase sequence, tracks a bounded
//! partial-step position and re-establishes the origin against a limit switch.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::units::Percent;
use crate::error::{Error, MotorError, Result};
use crate::switch::LimitSwitch;

use super::position::{Position, Travel};
use super::sequence::{Sequence, HALF_STEP, SEQUENCE_LEN};
use super::state::MotorState;
#[cfg(feature = "std")]
use super::stop::StopSignal;

/// Pause between partial steps when none is configured.
pub const DEFAULT_DELAY_US: u32 = 1_000;

/// Full steps per revolution of a 28BYJ-48 class motor.
pub const DEFAULT_STEPS_PER_REVOLUTION: u16 = 512;

/// Four-phase stepper motor with a home switch.
///
/// Generic over:
/// - `P`: coil output type (must implement `OutputPin`)
/// - `S`: switch input type (must implement `InputPin`)
/// - `D`: delay provider (must implement `DelayNs`)
///
/// The motor starts [`Uncalibrated`](MotorState::Uncalibrated) and refuses
/// motion until [`init`](Self::init) has found the switch.
pub struct StepperMotor<P, S, D> {
    /// Coil outputs, in sequence column order.
    coils: [P; 4],

    /// Home-position switch.
    switch: LimitSwitch<S>,

    /// Delay provider for step timing.
    delay: D,

    sequence: Sequence,
    position: Position,
    state: MotorState,

    /// Pause after each partial step.
    delay_us: u32,

    /// Partial steps in one revolution; half of it is the travel midpoint.
    part_steps_per_revolution: i64,

    /// Backward steps homing may take before giving up, `None` for unbounded.
    homing_max_steps: Option<u32>,

    /// Stop bursts early when the switch reads pressed away from home.
    end_stop_guard: bool,

    /// Motor name for logging.
    name: heapless::String<32>,

    #[cfg(feature = "std")]
    stop: Option<StopSignal>,
}

impl<P, S, D> StepperMotor<P, S, D>
where
    P: OutputPin,
    S: InputPin,
    D: DelayNs,
    Error: From<P::Error> + From<S::Error>,
{
    /// Create an uncalibrated motor with bounds `[0, i64::MAX]` and the
    /// half-step sequence.
    pub fn new(coils: [P; 4], switch: LimitSwitch<S>, delay: D) -> Self {
        Self {
            coils,
            switch,
            delay,
            sequence: HALF_STEP,
            position: Position::new(0, i64::MAX),
            state: MotorState::Uncalibrated,
            delay_us: DEFAULT_DELAY_US,
            part_steps_per_revolution: i64::from(DEFAULT_STEPS_PER_REVOLUTION)
                * SEQUENCE_LEN as i64,
            homing_max_steps: None,
            end_stop_guard: false,
            name: heapless::String::new(),
            #[cfg(feature = "std")]
            stop: None,
        }
    }

    /// Get the motor name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub(crate) fn set_name(&mut self, name: heapless::String<32>) {
        self.name = name;
    }

    /// Get the calibration state.
    #[inline]
    pub fn state(&self) -> MotorState {
        self.state
    }

    /// Whether the motor has been homed.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.state == MotorState::Ready
    }

    /// Snapshot of the position tracker.
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Current position in partial steps.
    #[inline]
    pub fn current_part_step(&self) -> i64 {
        self.position.part_step()
    }

    /// Current position in full steps.
    #[inline]
    pub fn current_step(&self) -> i64 {
        self.position.step()
    }

    /// Index of the phase the coils hold.
    #[inline]
    pub fn seq_idx(&self) -> usize {
        self.position.seq_idx()
    }

    /// Lower travel bound in partial steps.
    #[inline]
    pub fn min(&self) -> i64 {
        self.position.min()
    }

    /// Upper travel bound in partial steps.
    #[inline]
    pub fn max(&self) -> i64 {
        self.position.max()
    }

    /// Pause after each partial step, in microseconds.
    #[inline]
    pub fn delay_us(&self) -> u32 {
        self.delay_us
    }

    /// The home switch, with its last observed state.
    #[inline]
    pub fn switch(&self) -> &LimitSwitch<S> {
        &self.switch
    }

    /// Partial step halfway through one revolution.
    #[inline]
    pub fn midpoint(&self) -> i64 {
        self.part_steps_per_revolution / 2
    }

    /// Replace both travel bounds.
    ///
    /// # Errors
    ///
    /// - `InvalidBounds` unless `min <= 0 <= max` (home must be reachable)
    /// - `PositionOutsideBounds` if the motor is homed and its position
    ///   falls outside the new bounds
    pub fn set_bounds(&mut self, min: i64, max: i64) -> Result<()> {
        if min > 0 || max < 0 {
            return Err(MotorError::InvalidBounds { min, max }.into());
        }

        let position = self.position.part_step();
        if self.is_ready() && (position < min || position > max) {
            return Err(MotorError::PositionOutsideBounds { position, min, max }.into());
        }

        self.position.set_bounds(min, max);
        Ok(())
    }

    /// Replace the lower travel bound.
    pub fn set_min(&mut self, min: i64) -> Result<()> {
        self.set_bounds(min, self.position.max())
    }

    /// Replace the upper travel bound.
    pub fn set_max(&mut self, max: i64) -> Result<()> {
        self.set_bounds(self.position.min(), max)
    }

    /// Set the pause after each partial step.
    pub fn set_delay_us(&mut self, delay_us: u32) {
        self.delay_us = delay_us;
    }

    /// Set the number of full steps per revolution. Moves the midpoint used
    /// by [`cleanup`](Self::cleanup) and the end-stop guard.
    pub fn set_steps_per_revolution(&mut self, steps: u16) {
        self.part_steps_per_revolution = i64::from(steps) * SEQUENCE_LEN as i64;
    }

    /// Cap the number of backward steps homing may take.
    pub fn set_homing_limit(&mut self, max_steps: Option<u32>) {
        self.homing_max_steps = max_steps;
    }

    /// Stop partial-step bursts when the switch reads pressed on the far
    /// side of the midpoint in the direction of travel.
    pub fn set_end_stop_guard(&mut self, enabled: bool) {
        self.end_stop_guard = enabled;
    }

    /// Attach a shared stop signal.
    #[cfg(feature = "std")]
    pub fn set_stop_signal(&mut self, signal: StopSignal) {
        self.stop = Some(signal);
    }

    /// Advance `n` partial steps. Negative `n` moves backward.
    ///
    /// Steps that would leave `[min, max]` do not move but still write the
    /// current phase and pause.
    ///
    /// # Errors
    ///
    /// `NotHomed` before [`init`](Self::init), `Interrupted` on a stop
    /// request, or the coil/switch error.
    pub fn forward_part(&mut self, n: i64) -> Result<()> {
        if n < 0 {
            return self.backward_part(n.saturating_neg());
        }
        self.require_ready()?;
        self.burst(Travel::Forward, n.unsigned_abs()).map(|_| ())
    }

    /// Retreat `n` partial steps. Negative `n` moves forward.
    pub fn backward_part(&mut self, n: i64) -> Result<()> {
        if n < 0 {
            return self.forward_part(n.saturating_neg());
        }
        self.require_ready()?;
        self.burst(Travel::Backward, n.unsigned_abs()).map(|_| ())
    }

    /// Advance `n` full steps, each as its own burst. A burst cut short by a
    /// bound or the end-stop guard ends the whole move.
    pub fn forward_full(&mut self, n: i64) -> Result<()> {
        if n < 0 {
            return self.backward_full(n.saturating_neg());
        }
        self.require_ready()?;
        self.full_steps(Travel::Forward, n.unsigned_abs())
    }

    /// Retreat `n` full steps. Negative `n` moves forward.
    pub fn backward_full(&mut self, n: i64) -> Result<()> {
        if n < 0 {
            return self.forward_full(n.saturating_neg());
        }
        self.require_ready()?;
        self.full_steps(Travel::Backward, n.unsigned_abs())
    }

    /// Move to `percent` of `max`.
    pub fn move_to_percent(&mut self, percent: Percent) -> Result<()> {
        let target = percent.of(self.position.max());
        debug!(
            "{}: move to {}% (part step {})",
            self.name.as_str(),
            percent.value(),
            target
        );
        self.forward_part(target.saturating_sub(self.position.part_step()))
    }

    /// Search backward for the switch and make that location partial step 0.
    ///
    /// The lower bound is lifted for the search and restored on every exit
    /// path. On failure the motor is left `Uncalibrated` with its position
    /// pulled back inside the bounds.
    ///
    /// # Errors
    ///
    /// `HomingStalled` if the homing limit runs out, `Interrupted` on a stop
    /// request, or the coil/switch error.
    pub fn init(&mut self) -> Result<()> {
        info!("{}: homing", self.name.as_str());
        self.state = MotorState::Homing;

        let min = self.position.widen_min();
        let outcome = self.seek_switch();
        self.position.restore_min(min);

        match outcome {
            Ok(steps) => {
                self.position.set_origin();
                self.state = MotorState::Ready;
                info!("{}: homed after {} steps", self.name.as_str(), steps);
                Ok(())
            }
            Err(e) => {
                self.position.clamp_to_bounds();
                self.state = MotorState::Uncalibrated;
                warn!("{}: homing failed", self.name.as_str());
                Err(e)
            }
        }
    }

    /// Drive all coils low.
    pub fn de_energize(&mut self) -> Result<()> {
        for coil in self.coils.iter_mut() {
            coil.set_low()?;
        }
        Ok(())
    }

    /// Return home, drive the coils low and hand back the hardware.
    ///
    /// Past the midpoint one corrective backward step is taken and completed
    /// before homing. The coils are driven low even if homing fails.
    ///
    /// # Errors
    ///
    /// Returns the motor with the first error so the caller can retry.
    pub fn cleanup(mut self) -> core::result::Result<([P; 4], LimitSwitch<S>), (Self, Error)> {
        info!("{}: cleanup", self.name.as_str());
        let homed = self.return_home();
        let lowered = self.de_energize();

        match homed.and(lowered) {
            Ok(()) => Ok((self.coils, self.switch)),
            Err(e) => Err((self, e)),
        }
    }

    fn return_home(&mut self) -> Result<()> {
        if self.is_ready() && self.position.part_step() > self.midpoint() {
            self.backward_part(1)?;
        }
        self.init()
    }

    fn require_ready(&self) -> Result<()> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(MotorError::NotHomed.into())
        }
    }

    /// Backward single steps until the switch reads pressed. Returns the
    /// number of steps taken.
    fn seek_switch(&mut self) -> Result<u32> {
        let mut steps = 0u32;
        while !self.switch.check()? {
            if let Some(limit) = self.homing_max_steps {
                if steps >= limit {
                    warn!("{}: switch not found after {} steps", self.name.as_str(), steps);
                    return Err(MotorError::HomingStalled { steps }.into());
                }
            }
            self.part_step(Travel::Backward)?;
            steps = steps.saturating_add(1);
        }
        Ok(steps)
    }

    fn full_steps(&mut self, travel: Travel, count: u64) -> Result<()> {
        for _ in 0..count {
            if self.burst(travel, SEQUENCE_LEN as u64)? < SEQUENCE_LEN as u64 {
                break;
            }
        }
        Ok(())
    }

    /// Run up to `count` partial steps. Returns how many actually moved.
    fn burst(&mut self, travel: Travel, count: u64) -> Result<u64> {
        let mut moved = 0;
        for _ in 0..count {
            if self.end_stop_reached(travel)? {
                debug!("{}: end stop at part step {}", self.name.as_str(), self.position.part_step());
                break;
            }
            if self.part_step(travel)? {
                moved += 1;
            }
        }
        Ok(moved)
    }

    fn end_stop_reached(&mut self, travel: Travel) -> Result<bool> {
        if !self.end_stop_guard {
            return Ok(false);
        }
        let part_step = self.position.part_step();
        let far_side = match travel {
            Travel::Forward => part_step > self.midpoint(),
            Travel::Backward => part_step < self.midpoint(),
        };
        Ok(far_side && self.switch.check()?)
    }

    /// One partial step: move (or stall at a bound), write the phase, pause.
    fn part_step(&mut self, travel: Travel) -> Result<bool> {
        self.check_stop()?;

        let moved = self.position.change_by(travel.sign());
        if !moved {
            trace!("{}: bound reached at {}", self.name.as_str(), self.position.part_step());
        }

        self.apply_phase()?;
        self.delay.delay_us(self.delay_us);
        Ok(moved)
    }

    #[cfg(feature = "std")]
    fn check_stop(&self) -> Result<()> {
        if self.stop.as_ref().map_or(false, StopSignal::is_requested) {
            debug!("{}: stop requested", self.name.as_str());
            return Err(MotorError::Interrupted.into());
        }
        Ok(())
    }

    #[cfg(not(feature = "std"))]
    fn check_stop(&self) -> Result<()> {
        Ok(())
    }

    fn apply_phase(&mut self) -> Result<()> {
        let phase = self.sequence[self.position.seq_idx()];
        for (i, coil) in self.coils.iter_mut().enumerate() {
            if phase.coil(i) {
                coil.set_high()?;
            } else {
                coil.set_low()?;
            }
        }
        Ok(())
    }
}
