//! Expander device driver.

use core::marker::PhantomData;

use embedded_hal::i2c::{Error as _, I2c};

use crate::error::ExpanderError;

use super::mutex::{BusMutex, DefaultMutex};
use super::pin::VirtualPin;
use super::registers::{Register, DEFAULT_ADDRESS};
use super::row::{Direction, PinIndex, PinVector, Row, RowState};

/// Device state guarded by the bus mutex.
#[derive(Debug)]
pub struct ExpanderState<I2C> {
    i2c: I2C,
    rows: [RowState; 2],
    /// Direction vectors last accepted by the device, `None` until the first
    /// successful `configure_io`.
    committed: Option<[PinVector; 2]>,
    /// Bitmask of pins with a live handle, per row.
    issued: [u8; 2],
}

impl<I2C> ExpanderState<I2C> {
    fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            rows: [RowState::default(); 2],
            committed: None,
            issued: [0; 2],
        }
    }
}

/// One physical expander device: a transport handle plus a bus address.
///
/// Direction bits are staged with [`set_pin_io`](Self::set_pin_io) and pushed
/// to the device only by [`configure_io`](Self::configure_io). Pin handles
/// obtained from [`get_pin`](Self::get_pin) borrow the device, so directions
/// cannot be restaged while any handle is alive.
pub struct IoExpander<I2C, M = DefaultMutex<ExpanderState<I2C>>> {
    state: M,
    bus_id: u8,
    address: u8,
    _i2c: PhantomData<fn() -> I2C>,
}

impl<I2C, M> IoExpander<I2C, M>
where
    I2C: I2c,
    M: BusMutex<ExpanderState<I2C>>,
{
    /// Create a driver for the device at [`DEFAULT_ADDRESS`].
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, 0, DEFAULT_ADDRESS)
    }

    /// Create a driver for the device at `address` on bus `bus_id`.
    ///
    /// `bus_id` only labels the device in logs and errors; no I/O is
    /// performed until [`configure_io`](Self::configure_io).
    pub fn with_address(i2c: I2C, bus_id: u8, address: u8) -> Self {
        Self {
            state: M::create(ExpanderState::new(i2c)),
            bus_id,
            address,
            _i2c: PhantomData,
        }
    }

    /// Device bus address.
    #[inline]
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Bus number label.
    #[inline]
    pub fn bus_id(&self) -> u8 {
        self.bus_id
    }

    /// Stage the direction of one pin. Takes effect on the next
    /// [`configure_io`](Self::configure_io).
    pub fn set_pin_io(&mut self, row: Row, pin: PinIndex, direction: Direction) {
        self.state.get_mut().rows[row.index()]
            .directions
            .set(pin, direction.bit());
    }

    /// Stage the directions of a whole row.
    pub fn set_row_io(&mut self, row: Row, directions: PinVector) {
        self.state.get_mut().rows[row.index()].directions = directions;
    }

    /// Staged direction of one pin.
    pub fn direction(&self, row: Row, pin: PinIndex) -> Direction {
        self.state.lock(|s| s.rows[row.index()].direction(pin))
    }

    /// Cached value vector of a row.
    pub fn row_values(&self, row: Row) -> PinVector {
        self.state.lock(|s| s.rows[row.index()].values)
    }

    /// Write each row's staged direction vector to its direction register.
    ///
    /// # Errors
    ///
    /// Returns `ExpanderError::Bus` if either write fails. The device is then
    /// treated as unconfigured until a later call succeeds.
    pub fn configure_io(&mut self) -> Result<(), ExpanderError> {
        let address = self.address;
        let state = self.state.get_mut();
        state.committed = None;

        let mut committed = [PinVector::CLEAR; 2];
        for row in Row::ALL {
            let directions = state.rows[row.index()].directions;
            let byte = directions.pack();
            let register = Register::direction(row);
            debug!("expander {:#x}: row {} direction <- {:#x}", address, row, byte);
            state
                .i2c
                .write(address, &[register.addr(), byte])
                .map_err(|e| ExpanderError::Bus {
                    address,
                    kind: e.kind(),
                })?;
            committed[row.index()] = directions;
        }

        state.committed = Some(committed);
        Ok(())
    }

    /// Issue a handle to one pin.
    ///
    /// The handle's capability is the pin's committed direction at the time
    /// of the call.
    ///
    /// # Errors
    ///
    /// - `ExpanderError::NotConfigured` before the first successful
    ///   [`configure_io`](Self::configure_io)
    /// - `ExpanderError::PinTaken` if a handle to the pin is still alive
    pub fn get_pin(&self, row: Row, pin: PinIndex) -> Result<VirtualPin<'_, I2C, M>, ExpanderError> {
        let direction = self.state.lock(|s| {
            let committed = s.committed.ok_or(ExpanderError::NotConfigured)?;
            let issued = &mut s.issued[row.index()];
            if *issued & pin.mask() != 0 {
                return Err(ExpanderError::PinTaken { row, pin: pin.value() });
            }
            *issued |= pin.mask();
            Ok(Direction::from_bit(committed[row.index()].get(pin)))
        })?;

        trace!("expander {:#x}: issued pin {}{} as {}", self.address, row, pin.value(), direction);
        Ok(VirtualPin::new(self, row, pin, direction))
    }

    /// Issue a handle from raw identifiers, validating both.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRow`/`InvalidPin` for out-of-range identifiers, and
    /// the errors of [`get_pin`](Self::get_pin).
    pub fn pin(&self, row: u8, pin: u8) -> Result<VirtualPin<'_, I2C, M>, ExpanderError> {
        self.get_pin(Row::try_from(row)?, PinIndex::new(pin)?)
    }

    /// Give back the transport.
    pub fn release(self) -> I2C {
        self.state.into_inner().i2c
    }

    /// Set one cached output bit and commit the row's output latch.
    pub(crate) fn write_pin(&self, row: Row, pin: PinIndex, level: bool) -> Result<(), ExpanderError> {
        let address = self.address;
        self.state.lock(|s| {
            let values = &mut s.rows[row.index()].values;
            let previous = *values;
            values.set(pin, level);
            let byte = values.pack();

            let register = Register::output_latch(row);
            trace!("expander {:#x}: row {} latch <- {:#x}", address, row, byte);
            if let Err(e) = s.i2c.write(address, &[register.addr(), byte]) {
                s.rows[row.index()].values = previous;
                return Err(ExpanderError::Bus {
                    address,
                    kind: e.kind(),
                });
            }
            Ok(())
        })
    }

    /// Refresh a row from its input register and return one pin's value.
    pub(crate) fn read_pin(&self, row: Row, pin: PinIndex) -> Result<bool, ExpanderError> {
        let address = self.address;
        self.state.lock(|s| {
            let committed = s.committed.ok_or(ExpanderError::NotConfigured)?;
            let mut buf = [0u8; 1];
            s.i2c
                .write_read(address, &[Register::input(row).addr()], &mut buf)
                .map_err(|e| ExpanderError::Bus {
                    address,
                    kind: e.kind(),
                })?;
            trace!("expander {:#x}: row {} input -> {:#x}", address, row, buf[0]);

            let state = &mut s.rows[row.index()];
            state.adopt_inputs(committed[row.index()], PinVector::unpack(buf[0]));
            Ok(state.values.get(pin))
        })
    }

    /// Return a pin to the pool when its handle is dropped.
    pub(crate) fn release_pin(&self, row: Row, pin: PinIndex) {
        self.state.lock(|s| s.issued[row.index()] &= !pin.mask());
    }
}

impl<I2C, M> core::fmt::Debug for IoExpander<I2C, M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IoExpander")
            .field("bus_id", &self.bus_id)
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use core::cell::RefCell;

    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};

    use super::*;

    type Expander = IoExpander<I2cMock, RefCell<ExpanderState<I2cMock>>>;

    fn p(i: u8) -> PinIndex {
        PinIndex::new(i).unwrap()
    }

    #[test]
    fn test_configure_packs_directions() {
        let expectations = [
            Transaction::write(0x20, vec![0x00, 0b0001_0000]),
            Transaction::write(0x20, vec![0x01, 0b1000_0001]),
        ];
        let mut i2c = I2cMock::new(&expectations);

        let mut expander = Expander::new(i2c.clone());
        expander.set_pin_io(Row::A, p(4), Direction::Input);
        expander.set_pin_io(Row::B, p(0), Direction::Input);
        expander.set_pin_io(Row::B, p(7), Direction::Input);
        expander.configure_io().unwrap();

        i2c.done();
    }

    #[test]
    fn test_get_pin_requires_configuration() {
        let mut i2c = I2cMock::new(&[]);
        let expander = Expander::new(i2c.clone());

        assert_eq!(
            expander.get_pin(Row::A, p(0)).err(),
            Some(ExpanderError::NotConfigured)
        );
        i2c.done();
    }

    #[test]
    fn test_pin_issued_once() {
        let expectations = [
            Transaction::write(0x20, vec![0x00, 0x00]),
            Transaction::write(0x20, vec![0x01, 0x00]),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut expander = Expander::new(i2c.clone());
        expander.configure_io().unwrap();

        let first = expander.get_pin(Row::A, p(3)).unwrap();
        assert_eq!(
            expander.get_pin(Row::A, p(3)).err(),
            Some(ExpanderError::PinTaken { row: Row::A, pin: 3 })
        );
        drop(first);
        assert!(expander.get_pin(Row::A, p(3)).is_ok());

        i2c.done();
    }

    #[test]
    fn test_raw_identifiers_validated() {
        let mut i2c = I2cMock::new(&[]);
        let expander = Expander::new(i2c.clone());

        assert_eq!(expander.pin(2, 0).err(), Some(ExpanderError::InvalidRow(2)));
        assert_eq!(expander.pin(0, 9).err(), Some(ExpanderError::InvalidPin(9)));
        i2c.done();
    }

    #[test]
    fn test_failed_latch_write_restores_cache() {
        use embedded_hal::i2c::ErrorKind;

        let expectations = [
            Transaction::write(0x20, vec![0x00, 0x00]),
            Transaction::write(0x20, vec![0x01, 0x00]),
            Transaction::write(0x20, vec![0x14, 0x01]).with_error(ErrorKind::Other),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut expander = Expander::new(i2c.clone());
        expander.configure_io().unwrap();

        let pin = expander.get_pin(Row::A, p(0)).unwrap();
        assert_eq!(
            pin.write(true),
            Err(ExpanderError::Bus {
                address: 0x20,
                kind: ErrorKind::Other
            })
        );
        assert_eq!(expander.row_values(Row::A).pack(), 0);

        drop(pin);
        i2c.done();
    }
}
