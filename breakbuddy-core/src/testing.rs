//! Simulated collaborators for host tests
//!
//! `SimClock` and `SimDelay` share one timeline, so every blocking sleep the
//! code under test performs moves the clock forward.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::color::Color;
use crate::traits::{
    AudioError, AudioOutput, Clock, ClockError, DigitalInput, Drawable, InputError, Placement,
    RenderSurface, SurfaceError, WallTime,
};

pub const MS_PER_HOUR: u64 = 3_600_000;
pub const MS_PER_MINUTE: u64 = 60_000;

/// Shared simulated time in nanoseconds
#[derive(Clone, Default)]
pub struct Timeline(Rc<Cell<u64>>);

impl Timeline {
    pub fn starting_at_ms(ms: u64) -> Self {
        Self(Rc::new(Cell::new(ms * 1_000_000)))
    }

    pub fn now_ms(&self) -> u64 {
        self.0.get() / 1_000_000
    }

    pub fn advance_ns(&self, ns: u64) {
        self.0.set(self.0.get() + ns);
    }

    pub fn clock(&self) -> SimClock {
        SimClock {
            timeline: self.clone(),
            fault: None,
        }
    }

    /// Clock that fails every read with `fault`
    pub fn broken_clock(&self, fault: ClockError) -> SimClock {
        SimClock {
            timeline: self.clone(),
            fault: Some(fault),
        }
    }

    pub fn delay(&self) -> SimDelay {
        SimDelay {
            timeline: self.clone(),
            sleeps: Rc::new(Cell::new(0)),
        }
    }
}

/// Clock reading the timeline at UTC
pub struct SimClock {
    timeline: Timeline,
    fault: Option<ClockError>,
}

impl Clock for SimClock {
    fn now(&self) -> Result<WallTime, ClockError> {
        if let Some(e) = self.fault {
            return Err(e);
        }
        Ok(WallTime::from_epoch_ms(self.timeline.now_ms(), 0))
    }
}

/// Delay that advances the timeline instead of sleeping
pub struct SimDelay {
    timeline: Timeline,
    sleeps: Rc<Cell<u32>>,
}

impl SimDelay {
    /// Handle for counting sleeps after the delay has been moved
    pub fn sleep_counter(&self) -> Rc<Cell<u32>> {
        self.sleeps.clone()
    }
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.sleeps.set(self.sleeps.get() + 1);
        self.timeline.advance_ns(u64::from(ns));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.sleeps.set(self.sleeps.get() + 1);
        self.timeline.advance_ns(u64::from(ms) * 1_000_000);
    }
}

/// Calls made on the mock audio output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    Frequency(u32),
    Amplitude(u16),
}

#[derive(Default)]
pub struct MockAudio {
    pub events: Vec<AudioEvent>,
    /// Returned by every call when set
    pub fault: Option<AudioError>,
}

impl MockAudio {
    pub fn frequencies(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AudioEvent::Frequency(hz) => Some(*hz),
                _ => None,
            })
            .collect()
    }
}

impl AudioOutput for MockAudio {
    fn set_frequency(&mut self, hz: u32) -> Result<(), AudioError> {
        if let Some(e) = self.fault {
            return Err(e);
        }
        self.events.push(AudioEvent::Frequency(hz));
        Ok(())
    }

    fn set_amplitude(&mut self, level: u16) -> Result<(), AudioError> {
        if let Some(e) = self.fault {
            return Err(e);
        }
        self.events.push(AudioEvent::Amplitude(level));
        Ok(())
    }
}

/// Layer stack that records what was drawn
#[derive(Default)]
pub struct MockSurface {
    pub layers: Vec<(u32, Drawable)>,
    pub background: Option<Color>,
    pub background_writes: u32,
    pub squares_drawn: Vec<(u16, Color)>,
    pub max_layers: Option<usize>,
    pub next_id: u32,
}

impl MockSurface {
    pub fn texts(&self) -> Vec<&str> {
        self.layers
            .iter()
            .filter_map(|(_, d)| match d {
                Drawable::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn square_count(&self) -> usize {
        self.layers
            .iter()
            .filter(|(_, d)| matches!(d, Drawable::Square { .. }))
            .count()
    }
}

impl RenderSurface for MockSurface {
    type Layer = u32;

    fn add_layer(&mut self, drawable: Drawable, placement: Placement) -> Result<u32, SurfaceError> {
        if self.max_layers.is_some_and(|max| self.layers.len() >= max) {
            return Err(SurfaceError::LayerLimit);
        }
        if let Drawable::Square { size_px, color } = drawable {
            self.squares_drawn.push((size_px, color));
        }
        self.next_id += 1;
        let id = self.next_id;
        let index = match placement {
            Placement::Top => self.layers.len(),
            Placement::BelowTop => self.layers.len().saturating_sub(1),
        };
        self.layers.insert(index, (id, drawable));
        Ok(id)
    }

    fn remove_layer(&mut self, layer: u32) -> Result<(), SurfaceError> {
        let index = self
            .layers
            .iter()
            .position(|(id, _)| *id == layer)
            .ok_or(SurfaceError::UnknownLayer)?;
        self.layers.remove(index);
        Ok(())
    }

    fn set_background(&mut self, color: Color) -> Result<(), SurfaceError> {
        self.background = Some(color);
        self.background_writes += 1;
        Ok(())
    }
}

/// Input that replays a script of levels, then reads a fixed level
pub struct ScriptedInput {
    script: VecDeque<bool>,
    level: Rc<Cell<bool>>,
    fault: Option<InputError>,
}

impl ScriptedInput {
    pub fn new(script: &[bool]) -> Self {
        Self {
            script: script.iter().copied().collect(),
            level: Rc::new(Cell::new(false)),
            fault: None,
        }
    }

    /// Input whose every read fails with `fault`
    pub fn broken(fault: InputError) -> Self {
        Self {
            fault: Some(fault),
            ..Self::released()
        }
    }

    pub fn released() -> Self {
        Self::new(&[])
    }

    /// Handle for changing the level after the input has been moved
    pub fn level(&self) -> Rc<Cell<bool>> {
        self.level.clone()
    }
}

impl DigitalInput for ScriptedInput {
    fn read(&mut self) -> Result<bool, InputError> {
        if let Some(e) = self.fault {
            return Err(e);
        }
        Ok(self.script.pop_front().unwrap_or_else(|| self.level.get()))
    }
}
