//! PWM tone output for the piezo buzzer
//!
//! One PWM slice channel drives the buzzer. Each note reprograms the
//! slice's clock divider and wrap value:
//!
//! freq = SYS_CLK / (divider * (top + 1))
//!
//! The divider is kept as small as possible so the wrap value, and with it
//! the duty resolution, stays large.

use breakbuddy_hal::{PwmError, TonePwm, DUTY_FULL};
use embassy_rp::pwm::{Config, Pwm};
use fixed::types::extra::U4;
use fixed::FixedU16;

/// RP2040 system clock frequency (default PLL setup)
pub const SYS_CLK_HZ: u32 = 125_000_000;

/// Largest integer clock divider
const MAX_DIVIDER: u32 = 255;

/// Longest period in counter ticks (top = 0xFFFF)
const MAX_PERIOD: u32 = 1 << 16;

/// Shortest period in counter ticks, keeping 8 bits of duty resolution
const MIN_PERIOD: u32 = 256;

/// Lowest producible tone: SYS_CLK / (255 * 65536) rounded up
pub const MIN_TONE_HZ: u32 = 8;

/// Highest tone with at least [`MIN_PERIOD`] ticks per period
pub const MAX_TONE_HZ: u32 = SYS_CLK_HZ / MIN_PERIOD;

/// Slice settings for one frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ToneTiming {
    /// Integer clock divider (1-255)
    pub divider: u8,
    /// Counter wrap value
    pub top: u16,
}

impl ToneTiming {
    /// Compare value giving `duty` (fraction of [`DUTY_FULL`])
    pub fn compare_for(&self, duty: u16) -> u16 {
        let period = u64::from(self.top) + 1;
        let compare = period * u64::from(duty) / u64::from(DUTY_FULL);
        compare.min(u64::from(u16::MAX)) as u16
    }

    /// Frequency actually produced
    pub fn frequency_hz(&self) -> u32 {
        SYS_CLK_HZ / (u32::from(self.divider) * (u32::from(self.top) + 1))
    }
}

/// Calculate divider and wrap value for a tone
///
/// Returns `None` if the frequency is outside what the slice can produce.
pub fn tone_timing(hz: u32) -> Option<ToneTiming> {
    if hz == 0 {
        return None;
    }

    // System clock ticks per output period
    let cycles = SYS_CLK_HZ / hz;
    let divider = cycles.div_ceil(MAX_PERIOD).max(1);
    if divider > MAX_DIVIDER {
        return None;
    }

    let period = cycles / divider;
    if period < MIN_PERIOD {
        return None;
    }

    Some(ToneTiming {
        divider: divider as u8,
        top: (period - 1) as u16,
    })
}

/// Buzzer PWM on channel A of an embassy PWM slice
pub struct RpTonePwm<'d> {
    pwm: Pwm<'d>,
    config: Config,
    timing: ToneTiming,
    duty: u16,
}

impl<'d> RpTonePwm<'d> {
    /// Take over a slice set up with `Pwm::new_output_a`, starting silent
    pub fn new(pwm: Pwm<'d>) -> Self {
        let timing = ToneTiming {
            divider: 1,
            top: u16::MAX,
        };
        let mut tone = Self {
            pwm,
            config: Config::default(),
            timing,
            duty: 0,
        };
        tone.apply();
        tone
    }

    /// Current slice settings
    pub fn timing(&self) -> ToneTiming {
        self.timing
    }

    fn apply(&mut self) {
        self.config.divider = FixedU16::<U4>::from_num(u16::from(self.timing.divider));
        self.config.top = self.timing.top;
        self.config.compare_a = self.timing.compare_for(self.duty);
        self.pwm.set_config(&self.config);
    }
}

impl TonePwm for RpTonePwm<'_> {
    fn min_frequency_hz(&self) -> u32 {
        MIN_TONE_HZ
    }

    fn max_frequency_hz(&self) -> u32 {
        MAX_TONE_HZ
    }

    fn set_frequency_hz(&mut self, hz: u32) -> Result<(), PwmError> {
        self.timing = tone_timing(hz).ok_or(PwmError::FrequencyOutOfRange)?;
        self.apply();
        Ok(())
    }

    fn set_duty(&mut self, duty: u16) {
        self.duty = duty;
        self.config.compare_a = self.timing.compare_for(duty);
        self.pwm.set_config(&self.config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_middle_c_timing() {
        // 125 MHz / 262 Hz = 477099 ticks, needs a divider of 8
        let timing = tone_timing(262).unwrap();
        assert_eq!(timing, ToneTiming { divider: 8, top: 59636 });
        assert_eq!(timing.frequency_hz(), 262);
    }

    #[test]
    fn test_chime_notes_are_close() {
        for hz in [262, 330, 392] {
            let produced = tone_timing(hz).unwrap().frequency_hz();
            assert!(produced.abs_diff(hz) <= 1, "{} Hz produced {} Hz", hz, produced);
        }
    }

    #[test]
    fn test_range_limits() {
        assert_eq!(tone_timing(0), None);
        assert_eq!(tone_timing(MIN_TONE_HZ - 1), None);
        assert!(tone_timing(MIN_TONE_HZ).is_some());
        assert!(tone_timing(MAX_TONE_HZ).is_some());
        assert_eq!(tone_timing(MAX_TONE_HZ + 1_000), None);
    }

    #[test]
    fn test_compare_for_duty() {
        let timing = ToneTiming { divider: 1, top: 999 };
        assert_eq!(timing.compare_for(0), 0);
        assert_eq!(timing.compare_for(0x8000), 500);
        assert_eq!(timing.compare_for(DUTY_FULL), 1000);

        let widest = ToneTiming { divider: 1, top: u16::MAX };
        assert_eq!(widest.compare_for(DUTY_FULL), u16::MAX);
    }
}
