//! Audio output (piezo buzzer)

/// Amplitude level for a sounding tone (50% duty)
pub const AMPLITUDE_ON: u16 = 0x8000;

/// Amplitude level for silence
pub const AMPLITUDE_OFF: u16 = 0;

/// Errors from the audio output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AudioError {
    /// Frequency outside what the output can produce
    FrequencyOutOfRange,
    /// Output hardware not available
    Unavailable,
}

/// Tone output with frequency and amplitude control
///
/// Amplitude is on/off in practice: [`AMPLITUDE_ON`] or [`AMPLITUDE_OFF`].
pub trait AudioOutput {
    /// Set the output frequency in Hz
    fn set_frequency(&mut self, hz: u32) -> Result<(), AudioError>;

    /// Set the output amplitude (16-bit duty level)
    fn set_amplitude(&mut self, level: u16) -> Result<(), AudioError>;

    /// Silence the output
    fn silence(&mut self) -> Result<(), AudioError> {
        self.set_amplitude(AMPLITUDE_OFF)
    }
}
