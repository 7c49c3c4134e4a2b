//! Application side of the link
//!
//! [`Transmitter`] owns the two lines that do not need tick alignment
//! (data/command select and chip select) and talks to the interrupt through
//! the shared [`Mailbox`].

use tickbang_hal::OutputPin;

use super::handshake::Mailbox;

/// How the controller should interpret a byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ByteKind {
    /// Data/command line low
    Command,
    /// Data/command line high
    Data,
}

impl ByteKind {
    /// Check if this is a command byte
    pub fn is_command(self) -> bool {
        self == ByteKind::Command
    }
}

/// Byte submission API used by the application
pub struct Transmitter<'m, DC, CS> {
    mailbox: &'m Mailbox,
    dc: DC,
    cs: CS,
}

impl<'m, DC, CS> Transmitter<'m, DC, CS>
where
    DC: OutputPin,
    CS: OutputPin,
{
    /// Create a transmitter; the controller starts selected
    pub fn new(mailbox: &'m Mailbox, dc: DC, cs: CS) -> Self {
        let mut tx = Self { mailbox, dc, cs };
        tx.select();
        tx
    }

    /// Hand one byte to the interrupt without waiting for it to be sent
    ///
    /// The previous byte must have completed (see [`Self::is_busy`]); the
    /// slot holds a single byte and is not guarded against overwrite. If a
    /// reset was requested, this first spins until the interrupt has
    /// asserted the reset line, then releases it by publishing.
    pub fn submit_byte(&mut self, value: u8, kind: ByteKind) {
        self.mailbox.wait_reset_ack();
        // D/C is stable for the whole byte, so it can change right away
        self.dc.set_state(!kind.is_command());
        self.mailbox.publish(value, kind.is_command());
    }

    /// Hand one byte to the interrupt and spin until it is on the wire
    pub fn submit_byte_blocking(&mut self, value: u8, kind: ByteKind) {
        self.submit_byte(value, kind);
        self.mailbox.wait_idle();
    }

    /// Send a command byte, blocking
    pub fn command(&mut self, value: u8) {
        self.submit_byte_blocking(value, ByteKind::Command);
    }

    /// Send a data byte, blocking
    pub fn data(&mut self, value: u8) {
        self.submit_byte_blocking(value, ByteKind::Data);
    }

    /// Ask the interrupt to put the controller into hardware reset
    ///
    /// The reset is held until the next byte is submitted; that byte then
    /// waits for the release sequence before it is clocked out.
    pub fn request_reset(&self) {
        self.mailbox.request_reset();
    }

    /// Check if a submitted byte is still being sent
    pub fn is_busy(&self) -> bool {
        self.mailbox.is_busy()
    }

    /// Drive chip select active (low)
    pub fn select(&mut self) {
        self.cs.set_low();
    }

    /// Drive chip select inactive (high)
    pub fn deselect(&mut self) {
        self.cs.set_high();
    }

    /// Give the select pins back
    pub fn release(self) -> (DC, CS) {
        (self.dc, self.cs)
    }
}
