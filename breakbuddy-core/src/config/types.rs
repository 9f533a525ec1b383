//! Configuration type definitions
//!
//! Every type here is validated on construction, so a value that exists is
//! a value the animation code can use without further checks. Bad input
//! is turned away with a [`ConfigError`] long before the main loop starts.

use core::fmt;

use crate::color::{Color, LAVENDER, MIDNIGHT_BLUE, WHITE};
use crate::tone::{Chime, ToneSequencer};
use crate::traits::LabelText;

/// Default label shown while idle
pub const DEFAULT_IDLE_LABEL: &str = "just keep swimming";

/// Default label shown while breathing
pub const DEFAULT_BREATHE_LABEL: &str = "Take a moment\nto breathe";

/// Largest UTC offset accepted, in minutes (UTC+14:00)
pub const MAX_UTC_OFFSET_MINUTES: i16 = 14 * 60;

/// Longest chime note accepted, in milliseconds
pub const MAX_NOTE_MS: u32 = 10_000;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Animation needs at least two steps (factor divides by `steps - 1`)
    StepCountTooSmall,
    /// Breathing needs at least one cycle
    ZeroCycles,
    /// Duration is zero, out of range, or not a finite number
    InvalidDuration,
    /// Hour of day is not in 0-23
    InvalidHour,
    /// Pulse square sizes are empty or reversed
    InvalidGeometry,
    /// Repeat interval is zero
    ZeroInterval,
    /// UTC offset beyond ±14 hours
    InvalidUtcOffset,
    /// Label does not fit the label buffer
    LabelTooLong,
    /// A whole breathing run, chimes included, overflows the millisecond timeline
    RunTooLong,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ConfigError::StepCountTooSmall => "step count must be at least 2",
            ConfigError::ZeroCycles => "cycle count must be at least 1",
            ConfigError::InvalidDuration => "duration must be positive, finite and in range",
            ConfigError::InvalidHour => "hour must be between 0 and 23",
            ConfigError::InvalidGeometry => "pulse sizes must satisfy 0 < min <= max",
            ConfigError::ZeroInterval => "interval must be greater than zero",
            ConfigError::InvalidUtcOffset => "UTC offset must be within +/-14 hours",
            ConfigError::LabelTooLong => "label text is too long",
            ConfigError::RunTooLong => "breathing run does not fit in u32 milliseconds",
        };
        f.write_str(msg)
    }
}

/// Build a label, rejecting text that does not fit
pub fn label(text: &str) -> Result<LabelText, ConfigError> {
    LabelText::try_from(text).map_err(|_| ConfigError::LabelTooLong)
}

/// Breathing cycle timing
///
/// `total_minutes` of breathing is split into `cycle_count` equal cycles.
/// Each cycle is half inhale, half exhale, and each half is `step_count`
/// keyframes long.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleParameters {
    cycle_count: u8,
    total_minutes: f32,
    step_count: u16,
}

impl CycleParameters {
    /// Validate and create cycle parameters
    pub fn new(cycle_count: u8, total_minutes: f32, step_count: u16) -> Result<Self, ConfigError> {
        if step_count < 2 {
            return Err(ConfigError::StepCountTooSmall);
        }
        if cycle_count == 0 {
            return Err(ConfigError::ZeroCycles);
        }
        if !total_minutes.is_finite() || total_minutes <= 0.0 {
            return Err(ConfigError::InvalidDuration);
        }
        Ok(Self {
            cycle_count,
            total_minutes,
            step_count,
        })
    }

    /// Number of inhale/exhale cycles
    pub fn cycle_count(&self) -> u8 {
        self.cycle_count
    }

    /// Total breathing time in minutes
    pub fn total_minutes(&self) -> f32 {
        self.total_minutes
    }

    /// Keyframes per inhale (and per exhale)
    pub fn step_count(&self) -> u16 {
        self.step_count
    }

    /// Seconds per full inhale + exhale
    pub fn time_per_cycle_s(&self) -> f32 {
        self.total_minutes * 60.0 / f32::from(self.cycle_count)
    }

    /// Seconds per inhale or exhale
    pub fn inhale_exhale_time_s(&self) -> f32 {
        self.time_per_cycle_s() / 2.0
    }

    /// Seconds each keyframe is held
    pub fn time_per_step_s(&self) -> f32 {
        self.inhale_exhale_time_s() / f32::from(self.step_count)
    }

    /// Milliseconds each keyframe is held, truncated
    pub fn time_per_step_ms(&self) -> u32 {
        (self.time_per_step_s() * 1000.0) as u32
    }
}

impl Default for CycleParameters {
    /// Six breaths a minute, 21 keyframes per half-breath
    fn default() -> Self {
        Self {
            cycle_count: 6,
            total_minutes: 1.0,
            step_count: 21,
        }
    }
}

/// Size range of the breathing square
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseGeometry {
    min_size_px: u16,
    max_size_px: u16,
}

impl PulseGeometry {
    /// Validate and create a size range
    pub fn new(min_size_px: u16, max_size_px: u16) -> Result<Self, ConfigError> {
        if min_size_px == 0 || min_size_px > max_size_px {
            return Err(ConfigError::InvalidGeometry);
        }
        Ok(Self {
            min_size_px,
            max_size_px,
        })
    }

    /// Smallest square (fully exhaled)
    pub fn min_size_px(&self) -> u16 {
        self.min_size_px
    }

    /// Largest square (fully inhaled)
    pub fn max_size_px(&self) -> u16 {
        self.max_size_px
    }

    /// Square size for step `index` of `count`
    ///
    /// Step 0 is the minimum and step `count - 1` the maximum, with integer
    /// spacing in between. With the defaults and 21 steps this is
    /// 20, 24, 28, ..., 100.
    pub fn size_at(&self, index: u16, count: u16) -> u16 {
        debug_assert!(count >= 2 && index < count);
        let span = u32::from(self.max_size_px - self.min_size_px);
        let offset = span * u32::from(index) / u32::from(count - 1);
        self.min_size_px + offset as u16
    }
}

impl Default for PulseGeometry {
    fn default() -> Self {
        Self {
            min_size_px: 20,
            max_size_px: 100,
        }
    }
}

/// Hours of the day when scheduled reminders may run
///
/// Half-open: `[start_hour, end_hour)`. When `start_hour > end_hour` the
/// window wraps past midnight; when they are equal it never opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WorkWindow {
    start_hour: u8,
    end_hour: u8,
}

impl WorkWindow {
    /// Validate and create a window
    pub fn new(start_hour: u8, end_hour: u8) -> Result<Self, ConfigError> {
        if start_hour >= 24 || end_hour >= 24 {
            return Err(ConfigError::InvalidHour);
        }
        Ok(Self {
            start_hour,
            end_hour,
        })
    }

    /// First hour inside the window
    pub fn start_hour(&self) -> u8 {
        self.start_hour
    }

    /// First hour after the window
    pub fn end_hour(&self) -> u8 {
        self.end_hour
    }

    /// Check whether a local hour is inside the window
    pub fn contains(&self, hour: u8) -> bool {
        if self.start_hour <= self.end_hour {
            hour >= self.start_hour && hour < self.end_hour
        } else {
            hour >= self.start_hour || hour < self.end_hour
        }
    }
}

impl Default for WorkWindow {
    /// 9am to 5pm
    fn default() -> Self {
        Self {
            start_hour: 9,
            end_hour: 17,
        }
    }
}

/// Reminder schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScheduleConfig {
    interval_minutes: u16,
    /// Hours when the reminder is allowed to run
    pub window: WorkWindow,
}

impl ScheduleConfig {
    /// Validate and create a schedule
    pub fn new(interval_minutes: u16, window: WorkWindow) -> Result<Self, ConfigError> {
        if interval_minutes == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(Self {
            interval_minutes,
            window,
        })
    }

    /// Minutes between reminders
    pub fn interval_minutes(&self) -> u16 {
        self.interval_minutes
    }

    /// Milliseconds between reminders
    pub fn interval_ms(&self) -> u64 {
        u64::from(self.interval_minutes) * 60_000
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval_minutes: 45,
            window: WorkWindow::default(),
        }
    }
}

/// Breathing animation appearance and pacing
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BreathingConfig {
    /// Cycle timing
    pub cycles: CycleParameters,
    /// Square size range
    pub geometry: PulseGeometry,
    /// Square color at the start of an inhale (smallest)
    pub inhale_color: Color,
    /// Square color at the end of an inhale (largest)
    pub exhale_color: Color,
    /// Hold between inhale and exhale, in milliseconds
    pub pause_ms: u32,
    /// Background while breathing
    pub background: Color,
    /// Label shown while breathing
    pub label: LabelText,
    /// Label color
    pub text_color: Color,
}

impl BreathingConfig {
    /// Time spent on the cycles alone, chimes excluded, in milliseconds
    ///
    /// Computed in u64 so that any field values fit.
    pub fn cycles_duration_ms(&self) -> u64 {
        let steps = u64::from(self.cycles.step_count());
        let step_ms = u64::from(self.cycles.time_per_step_ms());
        let cycle_ms = 2 * steps * step_ms + 2 * u64::from(self.pause_ms);
        u64::from(self.cycles.cycle_count()) * cycle_ms
    }
}

impl Default for BreathingConfig {
    fn default() -> Self {
        Self {
            cycles: CycleParameters::default(),
            geometry: PulseGeometry::default(),
            inhale_color: LAVENDER,
            exhale_color: MIDNIGHT_BLUE,
            pause_ms: 200,
            background: MIDNIGHT_BLUE,
            label: LabelText::try_from(DEFAULT_BREATHE_LABEL).unwrap_or_default(),
            text_color: WHITE,
        }
    }
}

/// Idle screen appearance
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IdleConfig {
    /// Label shown while idle
    pub label: LabelText,
    /// Label color
    pub text_color: Color,
    /// Background color at the ends of a fade
    pub color_a: Color,
    /// Background color at the middle of a fade
    pub color_b: Color,
    steps: u16,
    delay_ms: u32,
}

impl IdleConfig {
    /// Validate and create an idle configuration
    pub fn new(
        label: LabelText,
        text_color: Color,
        color_a: Color,
        color_b: Color,
        steps: u16,
        delay_ms: u32,
    ) -> Result<Self, ConfigError> {
        if steps < 2 {
            return Err(ConfigError::StepCountTooSmall);
        }
        if delay_ms == 0 {
            return Err(ConfigError::InvalidDuration);
        }
        Ok(Self {
            label,
            text_color,
            color_a,
            color_b,
            steps,
            delay_ms,
        })
    }

    /// Interpolation steps in each direction of the fade
    pub fn steps(&self) -> u16 {
        self.steps
    }

    /// Delay after each background write, in milliseconds
    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }
}

impl Default for IdleConfig {
    fn default() -> Self {
        Self {
            label: LabelText::try_from(DEFAULT_IDLE_LABEL).unwrap_or_default(),
            text_color: WHITE,
            color_a: MIDNIGHT_BLUE,
            color_b: LAVENDER,
            steps: 20,
            delay_ms: 50,
        }
    }
}

/// Chime tone shape
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChimeConfig {
    note_ms: u32,
    vibrato_rate_hz: f32,
    vibrato_depth_hz: f32,
}

impl ChimeConfig {
    /// Validate and create a chime configuration
    pub fn new(
        note_ms: u32,
        vibrato_rate_hz: f32,
        vibrato_depth_hz: f32,
    ) -> Result<Self, ConfigError> {
        if note_ms == 0
            || note_ms > MAX_NOTE_MS
            || !vibrato_rate_hz.is_finite()
            || !vibrato_depth_hz.is_finite()
            || vibrato_rate_hz < 0.0
            || vibrato_depth_hz < 0.0
        {
            return Err(ConfigError::InvalidDuration);
        }
        Ok(Self {
            note_ms,
            vibrato_rate_hz,
            vibrato_depth_hz,
        })
    }

    /// Length of each chime note in milliseconds
    pub fn note_ms(&self) -> u32 {
        self.note_ms
    }

    /// Vibrato modulation rate in Hz
    pub fn vibrato_rate_hz(&self) -> f32 {
        self.vibrato_rate_hz
    }

    /// Vibrato peak deviation in Hz
    pub fn vibrato_depth_hz(&self) -> f32 {
        self.vibrato_depth_hz
    }
}

impl Default for ChimeConfig {
    fn default() -> Self {
        Self {
            note_ms: 600,
            vibrato_rate_hz: 6.0,
            vibrato_depth_hz: 4.0,
        }
    }
}

/// Button handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig {
    /// Pause after handling a press, in milliseconds
    pub debounce_ms: u32,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self { debounce_ms: 1000 }
    }
}

/// Local time settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockConfig {
    utc_offset_minutes: i16,
    /// Wall-clock time at power-on, seconds since the Unix epoch (0 = unset)
    pub epoch_at_boot_s: u64,
}

impl ClockConfig {
    /// Validate and create clock settings
    pub fn new(utc_offset_minutes: i16, epoch_at_boot_s: u64) -> Result<Self, ConfigError> {
        if utc_offset_minutes.unsigned_abs() > MAX_UTC_OFFSET_MINUTES as u16 {
            return Err(ConfigError::InvalidUtcOffset);
        }
        Ok(Self {
            utc_offset_minutes,
            epoch_at_boot_s,
        })
    }

    /// Offset of local time from UTC in minutes
    pub fn utc_offset_minutes(&self) -> i16 {
        self.utc_offset_minutes
    }
}

impl Default for ClockConfig {
    /// US Eastern daylight time, clock unset
    fn default() -> Self {
        Self {
            utc_offset_minutes: -240,
            epoch_at_boot_s: 0,
        }
    }
}

/// Complete device configuration
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceConfig {
    /// Reminder schedule
    pub schedule: ScheduleConfig,
    /// Breathing animation
    pub breathing: BreathingConfig,
    /// Idle screen
    pub idle: IdleConfig,
    /// Chime tones
    pub chime: ChimeConfig,
    /// Button handling
    pub button: ButtonConfig,
    /// Local time
    pub clock: ClockConfig,
}

impl DeviceConfig {
    /// Length of one breathing run, chimes included, in milliseconds
    pub fn run_duration_ms(&self) -> u64 {
        let tones = ToneSequencer::new(self.chime);
        u64::from(tones.chime_duration_ms(Chime::Intro))
            + self.breathing.cycles_duration_ms()
            + u64::from(tones.chime_duration_ms(Chime::Exit))
    }

    /// Check that a breathing run fits the engine's u32 millisecond timeline
    pub fn check_run_length(&self) -> Result<(), ConfigError> {
        if self.run_duration_ms() > u64::from(u32::MAX) {
            return Err(ConfigError::RunTooLong);
        }
        Ok(())
    }
}
