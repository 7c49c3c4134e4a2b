//! Lines driven from the tick interrupt
//!
//! The link engine never touches GPIO directly; it goes through
//! [`LinkLines`], which keeps the state machine runnable on a host against a
//! recording stub.

use tickbang_hal::OutputPin;

/// The three lines owned by the interrupt context
pub trait LinkLines {
    /// Drive the serial clock
    fn set_clock(&mut self, high: bool);

    /// Drive the serial data line
    fn set_data(&mut self, high: bool);

    /// Drive the controller's active-low reset line
    fn set_reset(&mut self, high: bool);
}

/// [`LinkLines`] backed by three output pins
pub struct LinkPins<CLK, SDI, RST> {
    clock: CLK,
    data: SDI,
    reset: RST,
}

impl<CLK, SDI, RST> LinkPins<CLK, SDI, RST>
where
    CLK: OutputPin,
    SDI: OutputPin,
    RST: OutputPin,
{
    /// Bundle the clock, data and reset pins
    pub fn new(clock: CLK, data: SDI, reset: RST) -> Self {
        Self { clock, data, reset }
    }

    /// Give the pins back
    pub fn release(self) -> (CLK, SDI, RST) {
        (self.clock, self.data, self.reset)
    }
}

impl<CLK, SDI, RST> LinkLines for LinkPins<CLK, SDI, RST>
where
    CLK: OutputPin,
    SDI: OutputPin,
    RST: OutputPin,
{
    fn set_clock(&mut self, high: bool) {
        self.clock.set_state(high);
    }

    fn set_data(&mut self, high: bool) {
        self.data.set_state(high);
    }

    fn set_reset(&mut self, high: bool) {
        self.reset.set_state(high);
    }
}
