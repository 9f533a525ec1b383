//! Break Buddy - Guided Breathing Desk Companion
//!
//! Firmware for a Raspberry Pi Pico W with a 128x128 ST7735R panel, a
//! piezo buzzer and one push button. Every reminder interval during work
//! hours (or when the button is pressed) it plays a chime and paces a
//! minute of breathing with a growing and shrinking square.
//!
//! Everything runs in the main task with blocking delays; the controller
//! loop only returns when a peripheral faults.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::spi::Spi;
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use breakbuddy_core::Controller;
use breakbuddy_display::Panel;
use breakbuddy_drivers::{GpioButton, PwmBuzzer};
use breakbuddy_hal_rp2040::{RpInput, RpTonePwm, UptimeClock};

use crate::config::load_config;
use crate::display::{display_spi_config, init_display};

mod config;
mod display;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Break Buddy starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            error!("breakbuddy.toml rejected: {}", e);
            panic!("invalid configuration");
        }
    };
    info!("Configuration loaded");

    // Button between GPIO0 and ground, internal pull-up
    let button = GpioButton::new_active_low(RpInput::new(Input::new(p.PIN_0, Pull::Up)));

    // Piezo buzzer on GPIO16 (PWM slice 0, channel A)
    let pwm = Pwm::new_output_a(p.PWM_SLICE0, p.PIN_16, PwmConfig::default());
    let buzzer = PwmBuzzer::new(RpTonePwm::new(pwm));

    // Display (TX-only SPI, the panel has no MISO)
    let cs = Output::new(p.PIN_5, Level::High);
    let dc = Output::new(p.PIN_6, Level::Low);
    let rst = Output::new(p.PIN_7, Level::High);
    let spi = Spi::new_blocking_txonly(p.SPI1, p.PIN_14, p.PIN_15, display_spi_config());
    let lcd = match init_display(spi, cs, dc, rst) {
        Ok(lcd) => lcd,
        Err(e) => {
            error!("Display init failed: {}", e);
            panic!("display init failed");
        }
    };
    let panel: Panel<_> = Panel::new(lcd, config.idle.color_a);
    info!("Display initialized");

    let clock = UptimeClock::new(
        config.clock.epoch_at_boot_s,
        config.clock.utc_offset_minutes(),
    );

    let mut controller = Controller::new(clock, panel, buzzer, button, Delay, &config);
    if let Err(e) = controller.start() {
        error!("Startup failed: {}", e);
        panic!("startup failed");
    }
    info!("Break Buddy running");

    let fault = controller.run();
    error!("Device fault: {}", fault);
    panic!("device fault");
}
