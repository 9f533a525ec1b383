//! Board-agnostic core logic for the Break Buddy firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (clock, render surface, audio, button input)
//! - Color blending
//! - Breathing animation sequence and engine
//! - Idle background pulse
//! - Chime playback
//! - Periodic reminder scheduler
//! - Main loop controller
//! - Configuration types and parser

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

mod log;

pub mod animation;
pub mod button;
pub mod color;
pub mod config;
pub mod controller;
pub mod scheduler;
pub mod tone;
pub mod traits;

#[cfg(test)]
mod testing;

pub use controller::{Controller, ControllerError, Job, TickReport};
