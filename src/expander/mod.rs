//! Register-level driver for a two-row, 16-pin I/O expander.
//!
//! The driver caches each row's direction and value vectors and turns
//! pin-level operations into whole-row register transactions:
//!
//! - [`IoExpander::configure_io`] packs the staged directions into the
//!   direction registers.
//! - [`VirtualPin::write`] sets one cached bit and commits the row's output
//!   latch.
//! - [`VirtualPin::read`] refreshes the row from the input register, adopting
//!   sampled levels for inputs only.
//!
//! All transactions on one device run under its [`BusMutex`], so handles used
//! from several threads never interleave a row commit.

mod device;
mod mutex;
mod pin;
pub mod registers;
mod row;

pub use device::{ExpanderState, IoExpander};
pub use mutex::{BusMutex, DefaultMutex};
pub use pin::VirtualPin;
pub use registers::{Register, DEFAULT_ADDRESS};
pub use row::{Direction, PinIndex, PinVector, Row, RowState, PINS_PER_ROW};
