//! Single vibrato tone

use core::f32::consts::PI;

use crate::config::ChimeConfig;

/// Length of one playback frame in milliseconds
pub const FRAME_MS: u32 = 10;

/// Middle C
pub const C4_HZ: f32 = 261.63;
/// E above middle C
pub const E4_HZ: f32 = 329.63;
/// G above middle C
pub const G4_HZ: f32 = 392.00;

/// A tone with vibrato
///
/// Playback is split into [`FRAME_MS`] frames; frame `k` sounds at
/// [`Note::frame`]`(k)` for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Note {
    /// Center frequency in Hz
    pub frequency_hz: f32,
    /// Length in milliseconds
    pub duration_ms: u32,
    /// Vibrato modulation rate in Hz
    pub vibrato_rate_hz: f32,
    /// Vibrato peak deviation in Hz
    pub vibrato_depth_hz: f32,
}

impl Note {
    /// Note with the default vibrato (6 Hz, ±4 Hz)
    pub const fn new(frequency_hz: f32, duration_ms: u32) -> Self {
        Self {
            frequency_hz,
            duration_ms,
            vibrato_rate_hz: 6.0,
            vibrato_depth_hz: 4.0,
        }
    }

    /// Note shaped by a chime configuration
    pub fn with_chime(frequency_hz: f32, chime: &ChimeConfig) -> Self {
        Self {
            frequency_hz,
            duration_ms: chime.note_ms(),
            vibrato_rate_hz: chime.vibrato_rate_hz(),
            vibrato_depth_hz: chime.vibrato_depth_hz(),
        }
    }

    /// Number of frames needed to cover the duration
    pub fn frame_count(&self) -> u32 {
        self.duration_ms.div_ceil(FRAME_MS)
    }

    /// Output frequency for frame `k`, truncated to whole Hz
    pub fn frame(&self, k: u32) -> u32 {
        let elapsed_s = k as f32 * (FRAME_MS as f32 / 1000.0);
        let phase = 2.0 * PI * self.vibrato_rate_hz * elapsed_s;
        let offset = micromath::F32(phase).sin().0 * self.vibrato_depth_hz;
        // `as` saturates at zero for a depth larger than the note itself
        (self.frequency_hz + offset) as u32
    }

    /// Iterate over the frame frequencies
    pub fn frames(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.frame_count()).map(move |k| self.frame(k))
    }
}
