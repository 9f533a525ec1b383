//! PWM tone output abstraction
//!
//! A piezo buzzer is driven by a square wave whose frequency sets the pitch
//! and whose duty cycle sets the loudness. Chip HALs implement [`TonePwm`]
//! by reprogramming a PWM slice's divider and wrap value.

/// Full-scale duty value (100%)
pub const DUTY_FULL: u16 = u16::MAX;

/// Errors from PWM tone operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmError {
    /// Requested frequency cannot be produced by the PWM hardware
    FrequencyOutOfRange,
}

/// Variable-frequency PWM output
pub trait TonePwm {
    /// Lowest frequency the hardware can produce
    fn min_frequency_hz(&self) -> u32;

    /// Highest frequency the hardware can produce
    fn max_frequency_hz(&self) -> u32;

    /// Reprogram the output frequency, keeping the current duty fraction
    fn set_frequency_hz(&mut self, hz: u32) -> Result<(), PwmError>;

    /// Set the duty cycle as a fraction of [`DUTY_FULL`]
    fn set_duty(&mut self, duty: u16);

    /// Check whether a frequency is within the hardware range
    fn supports_frequency(&self, hz: u32) -> bool {
        hz >= self.min_frequency_hz() && hz <= self.max_frequency_hz()
    }
}
