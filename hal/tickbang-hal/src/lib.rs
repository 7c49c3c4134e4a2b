//! Tickbang Hardware Abstraction Layer
//!
//! This crate defines the small hardware surface the bit-banged display link
//! needs from a chip-specific HAL: infallible push-pull outputs and the
//! arithmetic for a fixed-rate tick timer.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  tickbang-firmware (board wiring, ISR)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tickbang-core (link engine, panel)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tickbang-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital output driven from thread or interrupt context
//! - [`timer::TickTimerConfig`] - Prescaler/period for the periodic tick

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod timer;

// Re-export key types at crate root for convenience
pub use gpio::{HalPin, OutputPin};
pub use timer::{TickTimerConfig, TimerConfigError};
