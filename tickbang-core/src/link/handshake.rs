//! Single-slot handshake between the application and the tick interrupt
//!
//! The [`Mailbox`] holds at most one byte. The application is the only
//! writer of `value`/`command` and the only one that sets `ready`; the
//! interrupt is the only one that clears it. `ready` therefore carries the
//! whole happens-before relationship:
//!
//! - publish: `value` and `command` are stored, then `ready = true` with
//!   `Release`
//! - the interrupt loads `ready` with `Acquire` before reading the byte
//! - completion: the interrupt stores `ready = false` with `Release`, and the
//!   application's `Acquire` load of it orders everything after the wait
//!
//! Resets use a second pair of flags. The application raises
//! `reset_request`; the interrupt raises `reset_ack` once the reset line is
//! actually asserted. A publish withdraws the request, so the application
//! waits for the acknowledgement first, otherwise a byte sent right after a
//! request would cancel it before the interrupt ever saw it.
//!
//! Only plain loads and stores are used, so this works on cores without
//! atomic read-modify-write instructions.

use portable_atomic::{AtomicBool, AtomicU8, Ordering};

/// A byte handed to the interrupt for transmission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PendingByte {
    /// Byte to shift out
    pub value: u8,
    /// Sent with the data/command line in command position
    pub command: bool,
}

/// Pending byte slot plus the reset request and acknowledgement flags
///
/// Meant to live in a `static` shared by the application and the interrupt
/// handler.
#[derive(Debug)]
pub struct Mailbox {
    value: AtomicU8,
    command: AtomicBool,
    ready: AtomicBool,
    reset_request: AtomicBool,
    reset_ack: AtomicBool,
}

impl Default for Mailbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Mailbox {
    /// Create an empty mailbox
    pub const fn new() -> Self {
        Self {
            value: AtomicU8::new(0),
            command: AtomicBool::new(false),
            ready: AtomicBool::new(false),
            reset_request: AtomicBool::new(false),
            reset_ack: AtomicBool::new(false),
        }
    }

    // --- Application side ---

    /// Publish a byte for transmission
    ///
    /// The slot must be empty. Publishing also withdraws any reset request,
    /// which is what lets a held reset finish; call [`Self::wait_reset_ack`]
    /// first so the request is not withdrawn before it took effect.
    pub fn publish(&self, value: u8, command: bool) {
        self.reset_request.store(false, Ordering::Relaxed);
        self.value.store(value, Ordering::Relaxed);
        self.command.store(command, Ordering::Relaxed);
        self.ready.store(true, Ordering::Release);
    }

    /// Check if a published byte has not been fully sent yet
    pub fn is_busy(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Spin until the interrupt has consumed the pending byte
    pub fn wait_idle(&self) {
        while self.is_busy() {
            core::hint::spin_loop();
        }
    }

    /// Ask the interrupt to put the controller into hardware reset
    pub fn request_reset(&self) {
        self.reset_ack.store(false, Ordering::Relaxed);
        self.reset_request.store(true, Ordering::Release);
    }

    /// Check if a reset request is still waiting for the interrupt
    pub fn reset_unacknowledged(&self) -> bool {
        self.reset_request.load(Ordering::Acquire) && !self.reset_ack.load(Ordering::Acquire)
    }

    /// Spin until an outstanding reset request has asserted the reset line
    ///
    /// Returns immediately when no request is outstanding.
    pub fn wait_reset_ack(&self) {
        while self.reset_unacknowledged() {
            core::hint::spin_loop();
        }
    }

    // --- Interrupt side ---

    /// Byte waiting to be sent, if any
    pub fn pending(&self) -> Option<PendingByte> {
        if self.ready.load(Ordering::Acquire) {
            Some(PendingByte {
                value: self.value.load(Ordering::Relaxed),
                command: self.command.load(Ordering::Relaxed),
            })
        } else {
            None
        }
    }

    /// Mark the pending byte as fully transmitted
    pub fn complete(&self) {
        self.ready.store(false, Ordering::Release);
    }

    /// Check if a reset has been requested and not yet withdrawn
    pub fn reset_requested(&self) -> bool {
        self.reset_request.load(Ordering::Acquire)
    }

    /// Report that the reset line is asserted
    pub fn acknowledge_reset(&self) {
        self.reset_ack.store(true, Ordering::Release);
    }
}
