//! Board-agnostic core of the tickbang display link
//!
//! A dot-matrix LCD controller is driven over a bit-banged synchronous
//! serial link whose clock comes entirely from a fixed-rate timer
//! interrupt. This crate contains everything that does not depend on a
//! particular chip:
//!
//! - [`link`]: the per-tick state machine, the bit clocker, and the
//!   single-byte handshake with the application
//! - [`display`]: pixel buffer, 5x7 font, controller commands and frame
//!   encoder
//! - [`config`]: panel configuration
//!
//! # Wiring it up
//!
//! ```ignore
//! static MAILBOX: Mailbox = Mailbox::new();
//!
//! // Timer interrupt, once per tick
//! engine.on_tick(&MAILBOX);
//!
//! // Application
//! let mut panel = Panel::new(Transmitter::new(&MAILBOX, dc, cs), PanelConfig::default());
//! panel.init(&mut delay);
//! panel.write_frame(&buffer);
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod display;
pub mod link;

#[cfg(test)]
mod testing;

pub use config::PanelConfig;
pub use display::{Matrix128x64, Panel, PixelBuffer};
pub use link::{ByteKind, LinkEngine, LinkPins, Mailbox, Transmitter};
