//! Idle background pulse
//!
//! One pulse fades the background from color A to color B and back, one
//! background write per step.

use embedded_hal::delay::DelayNs;

use crate::color::{interpolate, step_factor, Color};
use crate::config::IdleConfig;
use crate::traits::{RenderSurface, SurfaceError};

/// Background fade between two colors
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IdlePulse {
    color_a: Color,
    color_b: Color,
    steps: u16,
    delay_ms: u32,
}

impl IdlePulse {
    /// Pulse from validated idle settings
    pub fn new(config: &IdleConfig) -> Self {
        Self {
            color_a: config.color_a,
            color_b: config.color_b,
            steps: config.steps(),
            delay_ms: config.delay_ms(),
        }
    }

    /// Blend factors for one pulse: `0..steps` then back down
    ///
    /// Both ends are repeated, so one pulse is `2 * steps` writes.
    pub fn factors(&self) -> impl Iterator<Item = f32> {
        let steps = self.steps;
        (0..steps)
            .chain((0..steps).rev())
            .map(move |i| step_factor(i, steps))
    }

    /// Background colors for one pulse
    pub fn colors(&self) -> impl Iterator<Item = Color> {
        let (a, b) = (self.color_a, self.color_b);
        self.factors().map(move |f| interpolate(a, b, f))
    }

    /// Writes per pulse
    pub fn frame_count(&self) -> u32 {
        2 * u32::from(self.steps)
    }

    /// Time one pulse takes (ms)
    pub fn duration_ms(&self) -> u32 {
        self.frame_count() * self.delay_ms
    }

    /// Run one full pulse, blocking
    pub fn step<S, D>(&self, surface: &mut S, delay: &mut D) -> Result<(), SurfaceError>
    where
        S: RenderSurface,
        D: DelayNs,
    {
        for color in self.colors() {
            surface.set_background(color)?;
            delay.delay_ms(self.delay_ms);
        }
        Ok(())
    }
}

impl Default for IdlePulse {
    fn default() -> Self {
        Self::new(&IdleConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{LAVENDER, MIDNIGHT_BLUE};
    use crate::testing::{MockSurface, Timeline};
    use std::vec::Vec;

    #[test]
    fn test_factors_are_palindromic() {
        let pulse = IdlePulse::default();
        let f: Vec<f32> = pulse.factors().collect();
        assert_eq!(f.len(), 40);
        assert_eq!(f[0], 0.0);
        assert_eq!(f[19], 1.0);
        assert_eq!(f[20], 1.0);
        assert_eq!(f[39], 0.0);
        let mut reversed = f.clone();
        reversed.reverse();
        assert_eq!(f, reversed);
    }

    #[test]
    fn test_colors_span_endpoints() {
        let pulse = IdlePulse::default();
        let c: Vec<Color> = pulse.colors().collect();
        assert_eq!(c[0], MIDNIGHT_BLUE);
        assert_eq!(c[19], LAVENDER);
        assert_eq!(c[39], MIDNIGHT_BLUE);
    }

    #[test]
    fn test_step_writes_and_sleeps() {
        let timeline = Timeline::starting_at_ms(0);
        let mut delay = timeline.delay();
        let sleeps = delay.sleep_counter();
        let mut surface = MockSurface::default();

        let pulse = IdlePulse::default();
        pulse.step(&mut surface, &mut delay).unwrap();

        assert_eq!(surface.background_writes, 40);
        assert_eq!(sleeps.get(), 40);
        assert_eq!(timeline.now_ms(), u64::from(pulse.duration_ms()));
        assert_eq!(timeline.now_ms(), 2000);
        assert_eq!(surface.background, Some(MIDNIGHT_BLUE));
        assert!(surface.layers.is_empty());
    }

    #[test]
    fn test_two_step_pulse() {
        let config = IdleConfig::new(
            crate::config::label("x").unwrap(),
            Color::default(),
            MIDNIGHT_BLUE,
            LAVENDER,
            2,
            10,
        )
        .unwrap();
        let colors: Vec<Color> = IdlePulse::new(&config).colors().collect();
        assert_eq!(colors, [MIDNIGHT_BLUE, LAVENDER, LAVENDER, MIDNIGHT_BLUE]);
    }
}
