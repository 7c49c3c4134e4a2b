//! Bit clocker
//!
//! Shifts one byte out MSB first, spending two ticks on every bit: a setup
//! half that puts the bit on the data line with the clock low, then a pulse
//! half that raises the clock so the controller latches it. A byte therefore
//! always takes exactly [`TICKS_PER_BYTE`] ticks, and the data line is stable
//! for a full tick before every rising edge.

use super::lines::LinkLines;

/// Ticks needed to shift out one byte (8 bits, two halves each)
pub const TICKS_PER_BYTE: u8 = 16;

/// Which half of the bit period the next tick performs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalfPhase {
    /// Drive the data line, clock low
    DataSetup,
    /// Raise the clock, data unchanged
    ClockPulse,
}

/// Result of one clocker tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ByteProgress {
    /// More ticks are needed for the current byte
    InProgress,
    /// The last clock pulse of the byte was just emitted
    Complete,
}

impl ByteProgress {
    /// Check if the byte has been fully shifted out
    pub fn is_complete(self) -> bool {
        self == ByteProgress::Complete
    }
}

/// Per-byte shift state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitClocker {
    /// Bit being sent, 0 = MSB
    bit_index: u8,
    /// Half of the bit period the next tick performs
    half: HalfPhase,
}

impl Default for BitClocker {
    fn default() -> Self {
        Self::new()
    }
}

impl BitClocker {
    /// Create a clocker positioned at the setup half of bit 0
    pub const fn new() -> Self {
        Self {
            bit_index: 0,
            half: HalfPhase::DataSetup,
        }
    }

    /// Rewind to the start of a byte
    pub fn rewind(&mut self) {
        *self = Self::new();
    }

    /// Index of the bit being sent (0 = most significant)
    pub fn bit_index(&self) -> u8 {
        self.bit_index
    }

    /// Half phase the next tick will perform
    pub fn half_phase(&self) -> HalfPhase {
        self.half
    }

    /// Check if the clocker sits at a byte boundary
    pub fn is_at_start(&self) -> bool {
        self.bit_index == 0 && self.half == HalfPhase::DataSetup
    }

    /// Perform one tick worth of line changes for `byte`
    ///
    /// Must be called with the same byte for all [`TICKS_PER_BYTE`] ticks of
    /// a transfer. After the final pulse the clocker rewinds itself.
    pub fn advance<L: LinkLines>(&mut self, byte: u8, lines: &mut L) -> ByteProgress {
        match self.half {
            HalfPhase::DataSetup => {
                let bit = byte & (0x80 >> self.bit_index) != 0;
                lines.set_data(bit);
                lines.set_clock(false);
                self.half = HalfPhase::ClockPulse;
                ByteProgress::InProgress
            }
            HalfPhase::ClockPulse => {
                lines.set_clock(true);
                self.half = HalfPhase::DataSetup;
                if self.bit_index == 7 {
                    self.bit_index = 0;
                    ByteProgress::Complete
                } else {
                    self.bit_index += 1;
                    ByteProgress::InProgress
                }
            }
        }
    }
}
