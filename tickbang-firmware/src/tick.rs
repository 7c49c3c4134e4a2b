//! TIM14 update interrupt driving the link engine
//!
//! TIM2 and TIM3 are left to the embassy time driver. TIM14 has a single
//! channel, which is all a free-running update interrupt needs.

use core::cell::RefCell;

use embassy_stm32::gpio::Output;
use embassy_stm32::interrupt;
use embassy_stm32::interrupt::{InterruptExt, Priority};
use embassy_stm32::pac;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use tickbang_core::{LinkEngine, LinkPins, Mailbox};
use tickbang_hal::{HalPin, TickTimerConfig};

/// Clock, data and reset lines as the engine owns them
pub type BoardLines =
    LinkPins<HalPin<Output<'static>>, HalPin<Output<'static>>, HalPin<Output<'static>>>;

/// Handshake slot shared between the refresh loop and the interrupt
pub static MAILBOX: Mailbox = Mailbox::new();

/// Engine state, installed once before the timer starts
static ENGINE: Mutex<CriticalSectionRawMutex, RefCell<Option<LinkEngine<BoardLines>>>> =
    Mutex::new(RefCell::new(None));

/// Hand the lines to the engine and start ticking at `config`'s rate
pub fn start(lines: BoardLines, config: &TickTimerConfig) {
    ENGINE.lock(|engine| {
        engine.replace(Some(LinkEngine::new(lines)));
    });

    pac::RCC.apb1enr().modify(|w| w.set_tim14en(true));

    let tim = pac::TIM14;
    tim.cr1().modify(|w| w.set_cen(false));
    tim.psc().write_value(config.prescaler());
    tim.arr().write(|w| w.set_arr(config.period()));
    // Load the prescaler now, then drop the update flag that generates
    tim.egr().write(|w| w.set_ug(true));
    tim.sr().modify(|w| w.set_uif(false));
    tim.dier().modify(|w| w.set_uie(true));

    interrupt::TIM14.set_priority(Priority::P1);
    // SAFETY: the handler only touches ENGINE, installed above
    unsafe { interrupt::TIM14.enable() };

    tim.cr1().modify(|w| w.set_cen(true));
}

#[interrupt]
fn TIM14() {
    pac::TIM14.sr().modify(|w| w.set_uif(false));

    ENGINE.lock(|engine| {
        if let Some(engine) = engine.borrow_mut().as_mut() {
            engine.on_tick(&MAILBOX);
        }
    });
}
