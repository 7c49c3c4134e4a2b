//! Configuration types
//!
//! Board-agnostic configuration structures. Timer settings live in
//! `tickbang-hal`, since they are register values.

pub mod panel;

pub use panel::*;
