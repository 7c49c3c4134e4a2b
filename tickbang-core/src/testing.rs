//! Host-side test doubles
//!
//! Mock pins, a line recorder, and a wire decoder that turns clock edges
//! back into bytes, plus a helper that runs the tick interrupt on its own
//! thread so the blocking API can be exercised for real.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tickbang_hal::OutputPin;

use crate::link::{ByteKind, LinkEngine, LinkLines, Mailbox};

/// Mock GPIO pin for testing
#[derive(Debug, Default)]
pub struct MockPin {
    pub high: bool,
}

impl MockPin {
    pub fn new() -> Self {
        Self { high: false }
    }
}

impl OutputPin for MockPin {
    fn set_high(&mut self) {
        self.high = true;
    }

    fn set_low(&mut self) {
        self.high = false;
    }
}

/// Last level written to each link line; everything starts low like after
/// GPIO init
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LineLevels {
    pub clock: bool,
    pub data: bool,
    pub reset: bool,
    /// Low-to-high transitions of the reset line
    pub reset_releases: u32,
}

impl LineLevels {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LinkLines for LineLevels {
    fn set_clock(&mut self, high: bool) {
        self.clock = high;
    }

    fn set_data(&mut self, high: bool) {
        self.data = high;
    }

    fn set_reset(&mut self, high: bool) {
        if high && !self.reset {
            self.reset_releases += 1;
        }
        self.reset = high;
    }
}

#[derive(Debug, Default)]
struct WireState {
    clock: bool,
    data: bool,
    reset: bool,
    dc: bool,
    shift: u8,
    bits: u8,
    bits_latched: usize,
    reset_pulses: usize,
    bytes: Vec<(u8, ByteKind)>,
}

/// Simulated controller input: samples data on rising clock edges while
/// out of reset and reassembles bytes MSB first
#[derive(Clone, Default)]
pub struct Wire {
    state: Arc<Mutex<WireState>>,
}

impl Wire {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines for the link engine
    pub fn lines(&self) -> WireLines {
        WireLines {
            state: self.state.clone(),
        }
    }

    /// Data/command select pin for the transmitter
    pub fn dc(&self) -> WireDc {
        WireDc {
            state: self.state.clone(),
        }
    }

    /// Bytes received so far, tagged by the D/C level at the last bit
    pub fn bytes(&self) -> Vec<(u8, ByteKind)> {
        self.state.lock().unwrap().bytes.clone()
    }

    /// Just the byte values received so far
    pub fn values(&self) -> Vec<u8> {
        self.bytes().into_iter().map(|(b, _)| b).collect()
    }

    pub fn bits_latched(&self) -> usize {
        self.state.lock().unwrap().bits_latched
    }

    /// High-to-low transitions of the reset line
    pub fn reset_pulses(&self) -> usize {
        self.state.lock().unwrap().reset_pulses
    }
}

pub struct WireLines {
    state: Arc<Mutex<WireState>>,
}

impl LinkLines for WireLines {
    fn set_clock(&mut self, high: bool) {
        let mut s = self.state.lock().unwrap();
        let rising = high && !s.clock;
        s.clock = high;
        if rising && s.reset {
            s.shift = (s.shift << 1) | s.data as u8;
            s.bits += 1;
            s.bits_latched += 1;
            if s.bits == 8 {
                let kind = if s.dc {
                    ByteKind::Data
                } else {
                    ByteKind::Command
                };
                let byte = s.shift;
                s.bytes.push((byte, kind));
                s.shift = 0;
                s.bits = 0;
            }
        }
    }

    fn set_data(&mut self, high: bool) {
        self.state.lock().unwrap().data = high;
    }

    fn set_reset(&mut self, high: bool) {
        let mut s = self.state.lock().unwrap();
        if !high && s.reset {
            s.reset_pulses += 1;
            // Controller forgets any partial byte
            s.shift = 0;
            s.bits = 0;
        }
        s.reset = high;
    }
}

pub struct WireDc {
    state: Arc<Mutex<WireState>>,
}

impl OutputPin for WireDc {
    fn set_high(&mut self) {
        self.state.lock().unwrap().dc = true;
    }

    fn set_low(&mut self) {
        self.state.lock().unwrap().dc = false;
    }
}

/// Run `f` while a second thread plays the timer interrupt
///
/// Returns `f`'s result and the number of ticks delivered.
pub fn with_ticker<L, R>(mailbox: &Mailbox, lines: L, f: impl FnOnce() -> R) -> (R, u64)
where
    L: LinkLines + Send,
{
    let stop = AtomicBool::new(false);

    std::thread::scope(|s| {
        let ticker = s.spawn(|| {
            let mut engine = LinkEngine::new(lines);
            let mut ticks = 0u64;
            while !stop.load(Ordering::Acquire) {
                engine.on_tick(mailbox);
                ticks += 1;
                std::thread::yield_now();
            }
            ticks
        });

        let result = f();
        stop.store(true, Ordering::Release);
        let ticks = ticker.join().expect("ticker thread panicked");
        (result, ticks)
    })
}
