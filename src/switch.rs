//! Limit switch polling.
//!
//! [`LimitSwitch`] wraps any `embedded-hal` input, either a direct GPIO or an
//! expander [`VirtualPin`](crate::expander::VirtualPin), behind one contract:
//! [`check`](LimitSwitch::check) reads the input, stores the result as
//! `pressed` and returns it. Nothing else changes `pressed`.

use embedded_hal::digital::InputPin;

use crate::error::{Error, Result};

/// A home-position switch read on demand.
#[derive(Debug)]
pub struct LimitSwitch<P> {
    pin: P,
    active_low: bool,
    pressed: bool,
}

impl<P> LimitSwitch<P>
where
    P: InputPin,
    Error: From<P::Error>,
{
    /// Wrap an input whose high level means "pressed".
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            active_low: false,
            pressed: false,
        }
    }

    /// Wrap an input whose low level means "pressed" (switch to ground with a
    /// pull-up).
    pub fn active_low(pin: P) -> Self {
        Self {
            pin,
            active_low: true,
            pressed: false,
        }
    }

    /// Perform one read and discard it.
    ///
    /// Some input hardware returns a stale level on the first read after
    /// setup. This is a workaround for such parts, not something every
    /// switch needs.
    pub fn settle(mut self) -> Result<Self> {
        let _ = self.pin.is_high()?;
        self.pressed = false;
        Ok(self)
    }

    /// Read the input, record it and return whether the switch is pressed.
    pub fn check(&mut self) -> Result<bool> {
        let high = self.pin.is_high()?;
        self.pressed = high != self.active_low;
        Ok(self.pressed)
    }

    /// Result of the most recent [`check`](Self::check).
    #[inline]
    pub fn pressed(&self) -> bool {
        self.pressed
    }

    /// Whether a low level means pressed.
    #[inline]
    pub fn is_active_low(&self) -> bool {
        self.active_low
    }

    /// Give back the input.
    pub fn release(self) -> P {
        self.pin
    }
}

#[cfg(test)]
mod tests {
    use core::convert::Infallible;

    use embedded_hal::digital::ErrorType;

    use super::*;

    struct Levels<'a> {
        levels: &'a [bool],
        reads: usize,
    }

    impl ErrorType for Levels<'_> {
        type Error = Infallible;
    }

    impl InputPin for Levels<'_> {
        fn is_high(&mut self) -> core::result::Result<bool, Infallible> {
            let level = self.levels[self.reads.min(self.levels.len() - 1)];
            self.reads += 1;
            Ok(level)
        }

        fn is_low(&mut self) -> core::result::Result<bool, Infallible> {
            self.is_high().map(|h| !h)
        }
    }

    #[test]
    fn test_check_records_pressed() {
        let mut switch = LimitSwitch::new(Levels {
            levels: &[false, true],
            reads: 0,
        });
        assert!(!switch.pressed());
        assert!(!switch.check().unwrap());
        assert!(switch.check().unwrap());
        assert!(switch.pressed());
    }

    #[test]
    fn test_active_low_inverts() {
        let mut switch = LimitSwitch::active_low(Levels {
            levels: &[true, false],
            reads: 0,
        });
        assert!(!switch.check().unwrap());
        assert!(switch.check().unwrap());
    }

    #[test]
    fn test_settle_discards_first_read() {
        let switch = LimitSwitch::new(Levels {
            levels: &[true, false],
            reads: 0,
        });
        let mut switch = switch.settle().unwrap();
        assert!(!switch.pressed());
        assert!(!switch.check().unwrap());
        assert_eq!(switch.release().reads, 2);
    }
}
