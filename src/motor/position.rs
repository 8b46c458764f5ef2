//! Partial-step position tracking for stepper motors.
//!
//! Tracks the signed partial-step count, the index into the phase sequence
//! and the inclusive travel bounds.

use super::sequence::SEQUENCE_LEN;

/// Direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Travel {
    /// Away from the home switch (increasing position).
    Forward,
    /// Toward the home switch (decreasing position).
    Backward,
}

impl Travel {
    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            Travel::Forward => 1,
            Travel::Backward => -1,
        }
    }
}

/// Motor position in partial steps with inclusive bounds.
///
/// `part_step` never leaves `[min, max]` through [`change_by`](Self::change_by):
/// a change that would exit the bounds is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    part_step: i64,
    seq_idx: usize,
    min: i64,
    max: i64,
}

impl Position {
    /// Create a tracker at partial step 0, phase 0.
    pub const fn new(min: i64, max: i64) -> Self {
        Self {
            part_step: 0,
            seq_idx: 0,
            min,
            max,
        }
    }

    /// Current position in partial steps.
    #[inline]
    pub fn part_step(&self) -> i64 {
        self.part_step
    }

    /// Current position in full steps, `floor(part_step / SEQUENCE_LEN)`.
    #[inline]
    pub fn step(&self) -> i64 {
        self.part_step.div_euclid(SEQUENCE_LEN as i64)
    }

    /// Index of the current phase in the sequence.
    #[inline]
    pub fn seq_idx(&self) -> usize {
        self.seq_idx
    }

    /// Lower bound (inclusive).
    #[inline]
    pub fn min(&self) -> i64 {
        self.min
    }

    /// Upper bound (inclusive).
    #[inline]
    pub fn max(&self) -> i64 {
        self.max
    }

    /// Whether a position lies within the bounds.
    #[inline]
    pub fn contains(&self, part_step: i64) -> bool {
        part_step >= self.min && part_step <= self.max
    }

    /// Move by `delta` partial steps, rotating the phase index with it.
    ///
    /// Returns `false` and leaves the position untouched if the move would
    /// exit the bounds. The phase index wraps in the direction of travel, so
    /// `-1` from phase 0 lands on the last phase.
    pub fn change_by(&mut self, delta: i64) -> bool {
        let next = match self.part_step.checked_add(delta) {
            Some(next) if self.contains(next) => next,
            _ => return false,
        };

        self.part_step = next;
        let shift = delta.rem_euclid(SEQUENCE_LEN as i64) as usize;
        self.seq_idx = (self.seq_idx + shift) % SEQUENCE_LEN;
        true
    }

    pub(crate) fn set_bounds(&mut self, min: i64, max: i64) {
        self.min = min;
        self.max = max;
    }

    /// Drop the lower bound, returning the old one for [`restore_min`](Self::restore_min).
    pub(crate) fn widen_min(&mut self) -> i64 {
        core::mem::replace(&mut self.min, i64::MIN)
    }

    pub(crate) fn restore_min(&mut self, min: i64) {
        self.min = min;
    }

    /// Pull the partial step back inside `[min, max]`. The phase index is
    /// kept.
    pub(crate) fn clamp_to_bounds(&mut self) {
        self.part_step = self.part_step.clamp(self.min, self.max);
    }

    /// Declare the current location as partial step 0. The phase index is
    /// kept so the coils continue from the phase they hold.
    pub(crate) fn set_origin(&mut self) {
        self.part_step = 0;
    }
}
