//! Capability-checked pin handles.

use core::fmt;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use embedded_hal::i2c::I2c;

use crate::error::ExpanderError;

use super::device::{ExpanderState, IoExpander};
use super::mutex::BusMutex;
use super::row::{Direction, PinIndex, Row};

/// Handle to one pin of one row of an [`IoExpander`].
///
/// The capability (input or output) is fixed when the handle is issued.
/// Writing an input or reading an output fails with
/// `ExpanderError::Capability` before any bus traffic.
pub struct VirtualPin<'a, I2C, M>
where
    I2C: I2c,
    M: BusMutex<ExpanderState<I2C>>,
{
    expander: &'a IoExpander<I2C, M>,
    row: Row,
    pin: PinIndex,
    direction: Direction,
}

impl<'a, I2C, M> VirtualPin<'a, I2C, M>
where
    I2C: I2c,
    M: BusMutex<ExpanderState<I2C>>,
{
    pub(crate) fn new(
        expander: &'a IoExpander<I2C, M>,
        row: Row,
        pin: PinIndex,
        direction: Direction,
    ) -> Self {
        Self {
            expander,
            row,
            pin,
            direction,
        }
    }

    /// Row of this pin.
    #[inline]
    pub fn row(&self) -> Row {
        self.row
    }

    /// Index within the row.
    #[inline]
    pub fn index(&self) -> PinIndex {
        self.pin
    }

    /// Capability of this handle.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Set the pin level and commit the row's output latch.
    ///
    /// # Errors
    ///
    /// `Capability` if the pin is an input, `Bus` on transport failure.
    pub fn write(&self, high: bool) -> Result<(), ExpanderError> {
        self.require(Direction::Output)?;
        self.expander.write_pin(self.row, self.pin, high)
    }

    /// Refresh the row from the input register and return this pin's level.
    ///
    /// # Errors
    ///
    /// `Capability` if the pin is an output, `Bus` on transport failure.
    pub fn read(&self) -> Result<bool, ExpanderError> {
        self.require(Direction::Input)?;
        self.expander.read_pin(self.row, self.pin)
    }

    fn require(&self, needed: Direction) -> Result<(), ExpanderError> {
        if self.direction == needed {
            return Ok(());
        }
        warn!(
            "expander {:#x}: pin {}{} is an {}, refused {} use",
            self.expander.address(),
            self.row,
            self.pin.value(),
            self.direction,
            needed
        );
        Err(ExpanderError::Capability {
            address: self.expander.address(),
            row: self.row,
            pin: self.pin.value(),
            direction: self.direction,
        })
    }
}

impl<I2C, M> Drop for VirtualPin<'_, I2C, M>
where
    I2C: I2c,
    M: BusMutex<ExpanderState<I2C>>,
{
    fn drop(&mut self) {
        self.expander.release_pin(self.row, self.pin);
    }
}

impl<I2C, M> fmt::Debug for VirtualPin<'_, I2C, M>
where
    I2C: I2c,
    M: BusMutex<ExpanderState<I2C>>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualPin")
            .field("address", &self.expander.address())
            .field("row", &self.row)
            .field("pin", &self.pin.value())
            .field("direction", &self.direction)
            .finish()
    }
}

impl<I2C, M> ErrorType for VirtualPin<'_, I2C, M>
where
    I2C: I2c,
    M: BusMutex<ExpanderState<I2C>>,
{
    type Error = ExpanderError;
}

impl<I2C, M> OutputPin for VirtualPin<'_, I2C, M>
where
    I2C: I2c,
    M: BusMutex<ExpanderState<I2C>>,
{
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true)
    }
}

impl<I2C, M> InputPin for VirtualPin<'_, I2C, M>
where
    I2C: I2c,
    M: BusMutex<ExpanderState<I2C>>,
{
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.read()
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.read().map(|level| !level)
    }
}
