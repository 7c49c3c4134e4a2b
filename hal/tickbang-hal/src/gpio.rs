//! GPIO pin abstractions
//!
//! The link only ever drives lines, it never reads them back, so the
//! output trait is narrower than `embedded-hal`'s and cannot
//! fail. [`HalPin`] bridges any infallible `embedded-hal` output into it.

use core::convert::Infallible;

/// Digital output pin
///
/// Implementations must be cheap enough to call from the tick interrupt:
/// a single register write, no waiting.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }
}

impl<P: OutputPin + ?Sized> OutputPin for &mut P {
    fn set_high(&mut self) {
        (**self).set_high();
    }

    fn set_low(&mut self) {
        (**self).set_low();
    }
}

/// Adapter from an `embedded-hal` output whose error type is `Infallible`
///
/// Chip HALs such as embassy expose their GPIO outputs this way.
#[derive(Debug)]
pub struct HalPin<P>(pub P);

impl<P> HalPin<P> {
    /// Wrap an `embedded-hal` output pin
    pub const fn new(pin: P) -> Self {
        Self(pin)
    }

    /// Get the wrapped pin back
    pub fn into_inner(self) -> P {
        self.0
    }
}

impl<P> OutputPin for HalPin<P>
where
    P: embedded_hal::digital::OutputPin<Error = Infallible>,
{
    fn set_high(&mut self) {
        match self.0.set_high() {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }

    fn set_low(&mut self) {
        match self.0.set_low() {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }
}
