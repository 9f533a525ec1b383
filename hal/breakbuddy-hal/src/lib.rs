//! Break Buddy Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that can be implemented
//! by chip-specific HALs. The drivers crate builds the device-level
//! collaborators (button, buzzer) on top of these, so the same driver code
//! runs against the RP2040 or a host-side mock.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  breakbuddy-drivers (button, buzzer)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  breakbuddy-hal (this crate - traits)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!         ┌───────────────────────┐
//!         │ breakbuddy-hal-rp2040 │
//!         └───────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`] - Digital input
//! - [`pwm::TonePwm`] - Variable-frequency PWM output for a piezo buzzer

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod pwm;

// Re-export key traits at crate root for convenience
pub use gpio::InputPin;
pub use pwm::{PwmError, TonePwm};
