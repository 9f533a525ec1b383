//! Piezo buzzer on a PWM output
//!
//! Pitch is the PWM frequency and loudness is the duty cycle. A buzzer
//! only really has two loudness levels: 50% duty for the loudest square
//! wave and 0% for silence.

use breakbuddy_core::traits::{AudioError, AudioOutput};
use breakbuddy_hal::{PwmError, TonePwm};

/// Piezo buzzer driven by a variable-frequency PWM
pub struct PwmBuzzer<P> {
    pwm: P,
    /// Last frequency programmed (0 = none yet)
    frequency_hz: u32,
    /// Last duty level written
    amplitude: u16,
}

impl<P: TonePwm> PwmBuzzer<P> {
    /// Create a silent buzzer
    pub fn new(mut pwm: P) -> Self {
        pwm.set_duty(0);
        Self {
            pwm,
            frequency_hz: 0,
            amplitude: 0,
        }
    }

    /// Current frequency in Hz
    pub fn frequency_hz(&self) -> u32 {
        self.frequency_hz
    }

    /// Current duty level
    pub fn amplitude(&self) -> u16 {
        self.amplitude
    }

    /// Check if the buzzer is sounding
    pub fn is_sounding(&self) -> bool {
        self.amplitude > 0
    }
}

impl<P: TonePwm> AudioOutput for PwmBuzzer<P> {
    fn set_frequency(&mut self, hz: u32) -> Result<(), AudioError> {
        if hz == self.frequency_hz {
            return Ok(());
        }
        if !self.pwm.supports_frequency(hz) {
            return Err(AudioError::FrequencyOutOfRange);
        }
        self.pwm.set_frequency_hz(hz).map_err(|e| match e {
            PwmError::FrequencyOutOfRange => AudioError::FrequencyOutOfRange,
        })?;
        self.frequency_hz = hz;
        Ok(())
    }

    fn set_amplitude(&mut self, level: u16) -> Result<(), AudioError> {
        if level != self.amplitude {
            self.pwm.set_duty(level);
            self.amplitude = level;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use breakbuddy_core::traits::{AMPLITUDE_OFF, AMPLITUDE_ON};

    /// Mock PWM slice for testing
    #[derive(Default)]
    struct MockPwm {
        frequency_hz: u32,
        duty: u16,
        frequency_writes: u32,
        duty_writes: u32,
    }

    impl TonePwm for MockPwm {
        fn min_frequency_hz(&self) -> u32 {
            20
        }

        fn max_frequency_hz(&self) -> u32 {
            20_000
        }

        fn set_frequency_hz(&mut self, hz: u32) -> Result<(), PwmError> {
            self.frequency_hz = hz;
            self.frequency_writes += 1;
            Ok(())
        }

        fn set_duty(&mut self, duty: u16) {
            self.duty = duty;
            self.duty_writes += 1;
        }
    }

    #[test]
    fn test_starts_silent() {
        let buzzer = PwmBuzzer::new(MockPwm::default());
        assert!(!buzzer.is_sounding());
        assert_eq!(buzzer.pwm.duty, 0);
        assert_eq!(buzzer.pwm.duty_writes, 1);
    }

    #[test]
    fn test_tone_on_and_off() {
        let mut buzzer = PwmBuzzer::new(MockPwm::default());
        buzzer.set_frequency(262).unwrap();
        buzzer.set_amplitude(AMPLITUDE_ON).unwrap();
        assert_eq!(buzzer.pwm.frequency_hz, 262);
        assert_eq!(buzzer.pwm.duty, 0x8000);
        assert!(buzzer.is_sounding());

        buzzer.silence().unwrap();
        assert_eq!(buzzer.pwm.duty, AMPLITUDE_OFF);
        assert!(!buzzer.is_sounding());
    }

    #[test]
    fn test_repeated_writes_are_skipped() {
        let mut buzzer = PwmBuzzer::new(MockPwm::default());
        for _ in 0..3 {
            buzzer.set_frequency(392).unwrap();
            buzzer.set_amplitude(AMPLITUDE_ON).unwrap();
        }
        assert_eq!(buzzer.pwm.frequency_writes, 1);
        // one write from new(), one from the first set_amplitude
        assert_eq!(buzzer.pwm.duty_writes, 2);
    }

    #[test]
    fn test_out_of_range_frequency() {
        let mut buzzer = PwmBuzzer::new(MockPwm::default());
        assert_eq!(buzzer.set_frequency(5), Err(AudioError::FrequencyOutOfRange));
        assert_eq!(buzzer.set_frequency(30_000), Err(AudioError::FrequencyOutOfRange));
        assert_eq!(buzzer.frequency_hz(), 0);
        assert_eq!(buzzer.pwm.frequency_writes, 0);
    }
}
