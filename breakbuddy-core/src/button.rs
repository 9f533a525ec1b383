//! Push button polling
//!
//! The button is level-polled once per main-loop pass. Debouncing comes
//! from the caller: after acting on a press it sleeps for the debounce
//! interval, so contact bounce and presses during that sleep are never
//! seen. A button held through the sleep is reported again on the next
//! poll.

use crate::traits::{DigitalInput, InputError};

/// Observed button levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonState {
    /// Level read on the last poll (true = pressed)
    pub raw_level: bool,
    /// Level last reported to the caller
    pub debounced: bool,
    /// Time of the last raw level change (ms)
    pub last_change_ms: u64,
}

/// Button with press reporting
#[derive(Debug)]
pub struct DebouncedButton<I> {
    input: I,
    state: ButtonState,
}

impl<I: DigitalInput> DebouncedButton<I> {
    /// Wrap an input (released at time 0)
    pub fn new(input: I) -> Self {
        Self {
            input,
            state: ButtonState::default(),
        }
    }

    /// Read the input; true when it is pressed right now
    pub fn poll(&mut self, now_ms: u64) -> Result<bool, InputError> {
        let level = self.input.read()?;
        if level != self.state.raw_level {
            self.state.raw_level = level;
            self.state.last_change_ms = now_ms;
        }
        self.state.debounced = level;
        Ok(level)
    }

    /// Current state
    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Release the wrapped input
    pub fn into_inner(self) -> I {
        self.input
    }
}
