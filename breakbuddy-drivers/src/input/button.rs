//! GPIO push button
//!
//! Reads a button wired to a GPIO pin and reports `true` while it is
//! pressed. The usual wiring is a switch to ground with the pin pulled up,
//! which reads low when pressed (active-low).

use breakbuddy_core::traits::{DigitalInput, InputError};
use breakbuddy_hal::InputPin;

/// Push button on a GPIO pin
pub struct GpioButton<P> {
    pin: P,
    /// If true, pressed = pin LOW
    active_low: bool,
}

impl<P: InputPin> GpioButton<P> {
    /// Create a new button
    ///
    /// # Arguments
    /// - `pin`: The input pin, with its pull resistor already configured
    /// - `active_low`: If true, the button is pressed when the pin reads LOW
    pub fn new(pin: P, active_low: bool) -> Self {
        Self { pin, active_low }
    }

    /// Button switching to ground against a pull-up
    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }

    /// Button switching to the supply against a pull-down
    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    /// Check if the button is pressed right now
    pub fn is_pressed(&self) -> bool {
        // Active-high: pressed = high; active-low: pressed = low
        self.pin.is_high() != self.active_low
    }
}

impl<P: InputPin> DigitalInput for GpioButton<P> {
    fn read(&mut self) -> Result<bool, InputError> {
        Ok(self.is_pressed())
    }
}
