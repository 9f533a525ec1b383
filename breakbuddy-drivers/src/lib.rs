//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the collaborator traits
//! defined in breakbuddy-core, built on the pin traits of breakbuddy-hal:
//!
//! - Push button (active-low or active-high GPIO)
//! - Piezo buzzer (variable-frequency PWM)

#![no_std]
#![deny(unsafe_code)]

pub mod audio;
pub mod input;

pub use audio::PwmBuzzer;
pub use input::GpioButton;
