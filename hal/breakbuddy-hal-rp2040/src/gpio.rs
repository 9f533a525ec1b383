//! GPIO input

use breakbuddy_hal::InputPin;
use embassy_rp::gpio::Input;

/// Embassy input pin behind the shared [`InputPin`] trait
///
/// Pull resistors are chosen when the embassy `Input` is created.
pub struct RpInput<'d> {
    pin: Input<'d>,
}

impl<'d> RpInput<'d> {
    pub fn new(pin: Input<'d>) -> Self {
        Self { pin }
    }

    /// Give back the embassy pin
    pub fn into_inner(self) -> Input<'d> {
        self.pin
    }
}

impl InputPin for RpInput<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}
