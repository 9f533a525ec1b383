//! Input drivers

pub mod button;

pub use button::GpioButton;
