//! Audio output drivers

pub mod buzzer;

pub use buzzer::PwmBuzzer;
