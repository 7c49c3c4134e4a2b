//! Tickbang Firmware
//!
//! Drives an ST7565-class 128x64 LCD from an STM32F042K6 without its SPI
//! peripheral. Every clock edge on the link comes from the TIM14 update
//! interrupt; the refresh loop only hands bytes to the mailbox.

#![no_std]
#![no_main]

mod tick;

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Level, Output, Speed};
use embassy_stm32::rcc::{Hsi48Config, Sysclk};
use embassy_time::{Delay, Timer};
use tickbang_core::{LinkPins, Matrix128x64, Panel, PanelConfig, Transmitter};
use tickbang_hal::{HalPin, TickTimerConfig};
use {defmt_rtt as _, panic_probe as _};

use crate::tick::MAILBOX;

/// Core and timer clock after switching to HSI48
const SYSCLK_HZ: u32 = 48_000_000;

/// One link phase per tick, two ticks per bit
const TICK_HZ: u32 = 200_000;

/// Settle time after GPIO setup and again after the timer starts
const SETTLE_MS: u64 = 10;

/// Interval between text refreshes
const REFRESH_MS: u64 = 5000;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Tickbang firmware starting...");

    let mut config = embassy_stm32::Config::default();
    config.rcc.hsi48 = Some(Hsi48Config {
        sync_from_usb: false,
    });
    config.rcc.sys = Sysclk::HSI48;
    let p = embassy_stm32::init(config);

    // Panel supply stays on for the life of the firmware
    let _regulator = Output::new(p.PA6, Level::High, Speed::Low);

    // Everything else starts low: RST held, CS asserted, DC command
    let clock = HalPin::new(Output::new(p.PA5, Level::Low, Speed::High));
    let data = HalPin::new(Output::new(p.PA7, Level::Low, Speed::High));
    let reset = HalPin::new(Output::new(p.PB1, Level::Low, Speed::High));
    let dc = HalPin::new(Output::new(p.PA4, Level::Low, Speed::High));
    let cs = HalPin::new(Output::new(p.PB0, Level::Low, Speed::High));

    Timer::after_millis(SETTLE_MS).await;

    let timer_config = match TickTimerConfig::new(SYSCLK_HZ, TICK_HZ) {
        Ok(config) => config,
        Err(e) => {
            warn!("Tick timer config rejected: {:?}, using reference", e);
            TickTimerConfig::default()
        }
    };
    info!(
        "Link tick {} Hz (psc {}, arr {}), {} bit/s",
        timer_config.actual_tick_hz(),
        timer_config.prescaler(),
        timer_config.period(),
        timer_config.bit_rate_hz()
    );
    tick::start(LinkPins::new(clock, data, reset), &timer_config);

    Timer::after_millis(SETTLE_MS).await;

    let tx = Transmitter::new(&MAILBOX, dc, cs);
    let mut panel = Panel::new(tx, PanelConfig::default());
    panel.init(&mut Delay);
    info!("Panel initialized, contrast {}", panel.config().contrast);

    let mut frame = Matrix128x64::new();
    frame.write_str(1, 0, "Tickbang");
    panel.write_frame(&frame);

    let mut refreshes: u32 = 0;
    loop {
        Timer::after_millis(REFRESH_MS).await;
        refreshes = refreshes.wrapping_add(1);

        frame.write_str(2, 0, "Tickbang LCD link");
        frame.write_str(3, 0, ":;'[]{}\\|!~`-_!@");
        frame.write_str(4, 0, "#$%^&*()+=/?<>,.\"");
        frame.write_fmt(6, 0, format_args!("refresh {}", refreshes));
        panel.write_frame(&frame);
        trace!("Frame {} sent", refreshes);
    }
}
