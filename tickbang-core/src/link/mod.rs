//! Bit-banged serial link
//!
//! Split along the two execution contexts:
//!
//! - interrupt side: [`LinkEngine`] / [`LinkState`] driving the clock, data
//!   and reset lines through [`LinkLines`], one phase per tick, with the
//!   [`BitClocker`] doing the per-bit work
//! - application side: [`Transmitter`] owning data/command and chip select
//!
//! The two meet only in the [`Mailbox`].

pub mod clocker;
pub mod handshake;
pub mod lines;
pub mod machine;
pub mod transmit;

pub use clocker::{BitClocker, ByteProgress, HalfPhase, TICKS_PER_BYTE};
pub use handshake::{Mailbox, PendingByte};
pub use lines::{LinkLines, LinkPins};
pub use machine::{LinkEngine, LinkPhase, LinkState, ResetStep};
pub use transmit::{ByteKind, Transmitter};
