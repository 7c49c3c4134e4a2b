//! Periodic tick timer arithmetic
//!
//! The link engine advances one phase per timer update event, so the only
//! thing a chip HAL has to provide is a free-running timer with an update
//! interrupt. This module turns a system clock and a wanted tick rate into
//! the prescaler/auto-reload pair every general purpose timer takes.

/// Largest value a 16-bit prescaler or auto-reload register can hold
const MAX_16BIT: u32 = u16::MAX as u32;

/// Errors from building a tick timer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerConfigError {
    /// System clock or tick rate is zero
    ZeroFrequency,
    /// Fewer than two timer clocks per tick
    TickTooFast,
}

/// Prescaler and period for a fixed-rate update interrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickTimerConfig {
    /// Timer input clock in Hz
    system_clock_hz: u32,
    /// Requested tick rate in Hz
    tick_hz: u32,
    /// Value for the prescaler register (divides by `prescaler + 1`)
    prescaler: u16,
    /// Value for the auto-reload register (counts `period + 1` clocks)
    period: u16,
}

impl TickTimerConfig {
    /// 200 kHz tick from a 96 MHz core clock, no prescaling
    pub const REFERENCE: Self = Self {
        system_clock_hz: 96_000_000,
        tick_hz: 200_000,
        prescaler: 0,
        period: 479,
    };

    /// Compute a configuration for `tick_hz` from `system_clock_hz`
    ///
    /// The prescaler is kept as small as possible so the period keeps full
    /// resolution; it only grows once the period no longer fits 16 bits.
    pub fn new(system_clock_hz: u32, tick_hz: u32) -> Result<Self, TimerConfigError> {
        if system_clock_hz == 0 || tick_hz == 0 {
            return Err(TimerConfigError::ZeroFrequency);
        }

        let clocks_per_tick = system_clock_hz / tick_hz;
        if clocks_per_tick < 2 {
            return Err(TimerConfigError::TickTooFast);
        }

        // A u32 clock count always fits prescaler * period of two 16-bit registers
        let prescaler = (clocks_per_tick - 1) / (MAX_16BIT + 1);
        let period = clocks_per_tick / (prescaler + 1) - 1;

        Ok(Self {
            system_clock_hz,
            tick_hz,
            prescaler: prescaler as u16,
            period: period as u16,
        })
    }

    /// Prescaler register value
    pub const fn prescaler(&self) -> u16 {
        self.prescaler
    }

    /// Auto-reload register value
    pub const fn period(&self) -> u16 {
        self.period
    }

    /// Requested tick rate
    pub const fn tick_hz(&self) -> u32 {
        self.tick_hz
    }

    /// Tick rate the registers actually produce (integer division truncates)
    pub const fn actual_tick_hz(&self) -> u32 {
        self.system_clock_hz / ((self.prescaler as u32 + 1) * (self.period as u32 + 1))
    }

    /// Serial bit rate on the wire: two ticks per bit
    pub const fn bit_rate_hz(&self) -> u32 {
        self.actual_tick_hz() / 2
    }
}

impl Default for TickTimerConfig {
    fn default() -> Self {
        Self::REFERENCE
    }
}
