//! Link state machine
//!
//! One call to [`LinkState::on_tick`] per timer interrupt. Each call does a
//! bounded amount of work: at most one clocker phase or one step of the
//! reset sequence, never a wait.

use super::clocker::BitClocker;
use super::handshake::Mailbox;
use super::lines::LinkLines;

/// Step of the start-up sequence that runs from `Idle`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResetStep {
    /// Park the clock high and rewind the clocker
    AssertClockIdle,
    /// Drive the reset line high, letting the controller run
    AssertReset,
}

/// Coarse link phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkPhase {
    /// Sequencing the controller out of reset
    Idle(ResetStep),
    /// Sending bytes, or waiting for one
    Transmitting,
    /// Holding the controller in reset until the request is withdrawn
    Resetting,
}

/// Complete interrupt-side state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkState {
    phase: LinkPhase,
    /// Controller has been (or still is) held in reset and must be released
    reset_pending: bool,
    clocker: BitClocker,
}

impl Default for LinkState {
    fn default() -> Self {
        Self::power_on()
    }
}

impl LinkState {
    /// State at power-on: the controller still needs its reset released
    pub const fn power_on() -> Self {
        Self {
            phase: LinkPhase::Idle(ResetStep::AssertClockIdle),
            reset_pending: true,
            clocker: BitClocker::new(),
        }
    }

    /// Current phase
    pub fn phase(&self) -> LinkPhase {
        self.phase
    }

    /// Check if the controller's reset still has to be released
    pub fn reset_pending(&self) -> bool {
        self.reset_pending
    }

    /// Bit clocker position
    pub fn clocker(&self) -> &BitClocker {
        &self.clocker
    }

    /// Check if the link can accept bytes without a reset sequence first
    pub fn is_ready(&self) -> bool {
        self.phase == LinkPhase::Transmitting
    }

    /// Advance by one tick
    ///
    /// Reads the mailbox, drives `lines`, and returns the next state. A
    /// reset request is only looked at while no byte is pending, so a byte
    /// that has started always gets all of its ticks.
    pub fn on_tick<L: LinkLines>(mut self, mailbox: &Mailbox, lines: &mut L) -> Self {
        self.phase = match self.phase {
            LinkPhase::Idle(_) if !self.reset_pending => LinkPhase::Transmitting,
            LinkPhase::Idle(ResetStep::AssertClockIdle) => {
                lines.set_clock(true);
                self.clocker.rewind();
                LinkPhase::Idle(ResetStep::AssertReset)
            }
            LinkPhase::Idle(ResetStep::AssertReset) => {
                lines.set_reset(true);
                self.reset_pending = false;
                LinkPhase::Transmitting
            }
            LinkPhase::Transmitting => match mailbox.pending() {
                Some(byte) => {
                    if self.clocker.advance(byte.value, lines).is_complete() {
                        mailbox.complete();
                    }
                    LinkPhase::Transmitting
                }
                None if mailbox.reset_requested() => LinkPhase::Resetting,
                None => LinkPhase::Transmitting,
            },
            LinkPhase::Resetting => {
                lines.set_clock(true);
                lines.set_reset(false);
                self.reset_pending = true;
                mailbox.acknowledge_reset();
                if mailbox.reset_requested() {
                    LinkPhase::Resetting
                } else {
                    LinkPhase::Idle(ResetStep::AssertClockIdle)
                }
            }
        };
        self
    }
}

/// Link state together with the lines it drives
///
/// This is what the timer interrupt handler owns.
pub struct LinkEngine<L> {
    state: LinkState,
    lines: L,
}

impl<L: LinkLines> LinkEngine<L> {
    /// Create an engine in the power-on state
    pub fn new(lines: L) -> Self {
        Self {
            state: LinkState::power_on(),
            lines,
        }
    }

    /// Run one tick; call exactly once per timer period
    pub fn on_tick(&mut self, mailbox: &Mailbox) {
        self.state = self.state.on_tick(mailbox, &mut self.lines);
    }

    /// Current state
    pub fn state(&self) -> &LinkState {
        &self.state
    }

    /// Lines driven by the engine
    pub fn lines(&self) -> &L {
        &self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::clocker::TICKS_PER_BYTE;
    use crate::testing::LineLevels;

    /// Engine past the power-on reset release
    fn started_engine() -> LinkEngine<LineLevels> {
        let mut engine = LinkEngine::new(LineLevels::new());
        let mailbox = Mailbox::new();
        engine.on_tick(&mailbox);
        engine.on_tick(&mailbox);
        assert!(engine.state().is_ready());
        engine
    }

    #[test]
    fn test_power_on_sequence() {
        let mailbox = Mailbox::new();
        let mut engine = LinkEngine::new(LineLevels::new());
        assert!(!engine.lines().reset);

        engine.on_tick(&mailbox);
        assert_eq!(
            engine.state().phase(),
            LinkPhase::Idle(ResetStep::AssertReset)
        );
        assert!(engine.lines().clock);
        assert!(!engine.lines().reset);

        engine.on_tick(&mailbox);
        assert_eq!(engine.state().phase(), LinkPhase::Transmitting);
        assert!(engine.lines().reset);
        assert!(!engine.state().reset_pending());
    }

    #[test]
    fn test_byte_waits_for_power_on_sequence() {
        let mailbox = Mailbox::new();
        let mut engine = LinkEngine::new(LineLevels::new());
        mailbox.publish(0xE2, true);

        engine.on_tick(&mailbox);
        engine.on_tick(&mailbox);
        assert!(mailbox.is_busy());
        assert!(engine.state().clocker().is_at_start());

        for _ in 0..TICKS_PER_BYTE {
            engine.on_tick(&mailbox);
        }
        assert!(!mailbox.is_busy());
    }

    #[test]
    fn test_idle_transmitting_does_nothing() {
        let mailbox = Mailbox::new();
        let mut engine = started_engine();
        let before = *engine.lines();

        for _ in 0..100 {
            engine.on_tick(&mailbox);
        }

        assert_eq!(engine.state().phase(), LinkPhase::Transmitting);
        assert_eq!(*engine.lines(), before);
    }

    #[test]
    fn test_byte_takes_sixteen_ticks() {
        let mailbox = Mailbox::new();
        let mut engine = started_engine();
        mailbox.publish(0xA5, false);

        for tick in 0..TICKS_PER_BYTE {
            assert!(mailbox.is_busy(), "cleared early before tick {}", tick);
            engine.on_tick(&mailbox);
        }
        assert!(!mailbox.is_busy());
    }

    #[test]
    fn test_reset_request_is_deferred_until_byte_completes() {
        for request_at in 1..TICKS_PER_BYTE {
            let mailbox = Mailbox::new();
            let mut engine = started_engine();
            mailbox.publish(0x3C, true);

            for tick in 0..TICKS_PER_BYTE {
                if tick == request_at {
                    mailbox.request_reset();
                }
                engine.on_tick(&mailbox);
                assert_eq!(
                    engine.state().phase(),
                    LinkPhase::Transmitting,
                    "entered reset mid-byte (request at {}, tick {})",
                    request_at,
                    tick
                );
            }
            assert!(!mailbox.is_busy());
            assert!(engine.lines().reset);

            engine.on_tick(&mailbox);
            assert_eq!(engine.state().phase(), LinkPhase::Resetting);
        }
    }

    #[test]
    fn test_resetting_holds_until_next_byte() {
        let mailbox = Mailbox::new();
        let mut engine = started_engine();
        mailbox.request_reset();

        engine.on_tick(&mailbox);
        assert_eq!(engine.state().phase(), LinkPhase::Resetting);
        assert!(mailbox.reset_unacknowledged(), "line not asserted yet");

        engine.on_tick(&mailbox);
        assert!(!engine.lines().reset);
        assert!(!mailbox.reset_unacknowledged());

        for _ in 0..10 {
            engine.on_tick(&mailbox);
            assert_eq!(engine.state().phase(), LinkPhase::Resetting);
            assert!(!engine.lines().reset);
            assert!(engine.lines().clock);
            assert!(engine.state().reset_pending());
        }

        // Submitting the next byte withdraws the request
        mailbox.publish(0xE2, true);
        engine.on_tick(&mailbox);
        assert_eq!(
            engine.state().phase(),
            LinkPhase::Idle(ResetStep::AssertClockIdle)
        );

        engine.on_tick(&mailbox);
        engine.on_tick(&mailbox);
        assert_eq!(engine.state().phase(), LinkPhase::Transmitting);
        assert!(engine.lines().reset);

        for _ in 0..TICKS_PER_BYTE {
            engine.on_tick(&mailbox);
        }
        assert!(!mailbox.is_busy());
    }

    #[test]
    fn test_repeated_requests_coalesce() {
        let mailbox = Mailbox::new();
        let mut lines = LineLevels::new();
        let mut state = LinkState::power_on();
        state = state.on_tick(&mailbox, &mut lines);
        state = state.on_tick(&mailbox, &mut lines);
        lines.reset_releases = 0;

        mailbox.request_reset();
        for _ in 0..20 {
            mailbox.request_reset();
            state = state.on_tick(&mailbox, &mut lines);
        }
        mailbox.publish(0x00, true);
        for _ in 0..(3 + TICKS_PER_BYTE) {
            state = state.on_tick(&mailbox, &mut lines);
        }

        assert_eq!(lines.reset_releases, 1);
        assert_eq!(state.phase(), LinkPhase::Transmitting);
        assert!(!mailbox.is_busy());
    }

    #[test]
    fn test_on_tick_is_a_pure_transition() {
        let mailbox = Mailbox::new();
        let mut lines_a = LineLevels::new();
        let mut lines_b = LineLevels::new();

        let start = LinkState::power_on();
        let a = start.on_tick(&mailbox, &mut lines_a);
        let b = start.on_tick(&mailbox, &mut lines_b);

        assert_eq!(a, b);
        assert_eq!(lines_a, lines_b);
        assert_eq!(start, LinkState::power_on());
    }
}
