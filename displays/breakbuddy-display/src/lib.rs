//! Layered render surface for Break Buddy
//!
//! This crate provides:
//! - [`LayerStack`]: the background color plus an ordered list of
//!   drawables, implementing the core `RenderSurface` trait
//! - [`Panel`]: a `LayerStack` bound to an `embedded-graphics` draw target
//!   that redraws the screen after every change
//! - Color conversion from the core 24-bit color to `embedded-graphics`
//!
//! # Architecture
//!
//! The engine in breakbuddy-core only adds, removes and recolors layers.
//! Turning layers into pixels happens here, so any panel with a
//! `DrawTarget` implementation (the ST7735 on the device, `MockDisplay` in
//! tests) can be used.

#![no_std]

pub mod color;
pub mod panel;
pub mod stack;

// Re-export key types
pub use color::{to_rgb565, to_rgb888};
pub use panel::Panel;
pub use stack::{LayerId, LayerStack, MAX_LAYERS};
