//! Pulse square keyframes

use crate::color::{interpolate, step_factor, Color};
use crate::config::BreathingConfig;
use crate::traits::Drawable;

/// One frame of the pulsing square
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyframeStep {
    /// Edge length in pixels
    pub size_px: u16,
    /// Fill color
    pub color: Color,
}

impl KeyframeStep {
    /// Frame `index` of an inhale: growing, inhale color toward exhale color
    pub fn inhale(config: &BreathingConfig, index: u16) -> Self {
        let count = config.cycles.step_count();
        Self {
            size_px: config.geometry.size_at(index, count),
            color: interpolate(
                config.inhale_color,
                config.exhale_color,
                step_factor(index, count),
            ),
        }
    }

    /// Frame `index` of an exhale: shrinking, exhale color back toward inhale color
    pub fn exhale(config: &BreathingConfig, index: u16) -> Self {
        let count = config.cycles.step_count();
        Self {
            size_px: config.geometry.size_at(count - 1 - index, count),
            color: interpolate(
                config.exhale_color,
                config.inhale_color,
                step_factor(index, count),
            ),
        }
    }

    /// Centered square for this frame
    pub fn drawable(&self) -> Drawable {
        Drawable::square(self.size_px, self.color)
    }
}

/// All inhale frames in order
pub fn inhale_keyframes(config: &BreathingConfig) -> impl Iterator<Item = KeyframeStep> + '_ {
    (0..config.cycles.step_count()).map(move |i| KeyframeStep::inhale(config, i))
}

/// All exhale frames in order
pub fn exhale_keyframes(config: &BreathingConfig) -> impl Iterator<Item = KeyframeStep> + '_ {
    (0..config.cycles.step_count()).map(move |i| KeyframeStep::exhale(config, i))
}
