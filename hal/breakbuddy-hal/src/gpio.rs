//! GPIO pin abstractions
//!
//! Provides the digital input trait implemented by chip-specific HALs.

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip. Pull resistors are configured when the pin is
/// constructed, not through this trait.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

impl<T: InputPin + ?Sized> InputPin for &T {
    fn is_high(&self) -> bool {
        (**self).is_high()
    }
}
