//! Dot-matrix panel controller
//!
//! Command sequences for the page-addressed LCD controller on the far end
//! of the link, and the frame encoder that streams a [`PixelBuffer`] into
//! it. Every byte goes through [`Transmitter::submit_byte_blocking`], so
//! the order on the wire is exactly the call order below.

use embedded_hal::delay::DelayNs;
use tickbang_hal::OutputPin;

use super::framebuffer::PixelBuffer;
use crate::config::{PanelConfig, MAX_CONTRAST};
use crate::link::Transmitter;

/// Controller commands
pub mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SEG_NORMAL: u8 = 0xA0;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const BIAS_1_9: u8 = 0xA2;
    pub const COM_SCAN_REVERSE: u8 = 0xC8;
    pub const RESISTOR_RATIO_4: u8 = 0x24;
    pub const SET_VOLUME: u8 = 0x81;
    pub const POWER_ALL_ON: u8 = 0x2F;
    pub const SOFT_RESET: u8 = 0xE2;
    /// End of a write pass; releases the column auto-increment mode
    pub const RELEASE: u8 = 0xEE;
}

/// Panel driver on top of the bit-banged link
pub struct Panel<'m, DC, CS> {
    tx: Transmitter<'m, DC, CS>,
    config: PanelConfig,
}

impl<'m, DC, CS> Panel<'m, DC, CS>
where
    DC: OutputPin,
    CS: OutputPin,
{
    /// Create a panel driver
    pub fn new(tx: Transmitter<'m, DC, CS>, config: PanelConfig) -> Self {
        Self { tx, config }
    }

    /// Initialize the controller
    ///
    /// Software reset, settle delay, then bias, scan direction, regulator,
    /// contrast and power setup, ending with the display switched on.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) {
        self.tx.command(cmd::SOFT_RESET);
        delay.delay_ms(self.config.reset_settle_ms);

        let init_cmds: &[u8] = &[
            cmd::BIAS_1_9,
            cmd::SEG_NORMAL,
            cmd::COM_SCAN_REVERSE,
            cmd::RESISTOR_RATIO_4,
            cmd::SET_VOLUME,
            self.config.contrast,
            cmd::POWER_ALL_ON,
            cmd::SET_START_LINE,
            cmd::DISPLAY_ON,
        ];

        for &c in init_cmds {
            self.tx.command(c);
        }
    }

    /// Set contrast, clamped to 0x00-0x3F
    pub fn set_contrast(&mut self, contrast: u8) {
        let contrast = contrast.min(MAX_CONTRAST);
        self.tx.command(cmd::SET_VOLUME);
        self.tx.command(contrast);
        self.config.contrast = contrast;
    }

    /// Turn display on/off
    pub fn set_display_on(&mut self, on: bool) {
        if on {
            self.tx.command(cmd::DISPLAY_ON);
        } else {
            self.tx.command(cmd::DISPLAY_OFF);
        }
    }

    /// Invert display
    pub fn set_inverted(&mut self, inverted: bool) {
        if inverted {
            self.tx.command(cmd::SET_INVERSE);
        } else {
            self.tx.command(cmd::SET_NORMAL);
        }
    }

    /// Put the controller into hardware reset
    ///
    /// The reset line stays asserted until the next byte is sent; follow up
    /// with [`Self::init`].
    pub fn hardware_reset(&mut self) {
        self.tx.request_reset();
    }

    /// Send the whole buffer
    ///
    /// Per page: page address, column address 0, then every column as data.
    /// A single release command closes the pass. Buffers with more pages
    /// than the 4-bit page address can reach fail to compile.
    pub fn write_frame<const COLS: usize, const PAGES: usize>(
        &mut self,
        buffer: &PixelBuffer<COLS, PAGES>,
    ) {
        let () = PixelBuffer::<COLS, PAGES>::PAGE_ADDRESSABLE;

        for (page, columns) in buffer.pages().enumerate() {
            self.tx.command(cmd::SET_PAGE_ADDR | page as u8);
            self.tx.command(cmd::SET_HIGH_COLUMN);
            self.tx.command(cmd::SET_LOW_COLUMN);

            for &column in columns {
                self.tx.data(column);
            }
        }

        self.tx.command(cmd::RELEASE);
    }

    /// Current configuration (contrast tracks `set_contrast`)
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }
}
