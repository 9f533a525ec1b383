//! RP2040-specific HAL for Break Buddy
//!
//! This crate provides RP2040 implementations of the shared
//! `breakbuddy-hal` traits, plus the device's time source:
//!
//! - GPIO input wrapper for the push button
//! - PWM slice reprogrammed per note for the piezo buzzer
//! - Wall clock derived from the embassy uptime counter

#![no_std]

pub mod clock;
pub mod gpio;
pub mod pwm;

pub use clock::UptimeClock;
pub use gpio::RpInput;
pub use pwm::{RpTonePwm, SYS_CLK_HZ};
