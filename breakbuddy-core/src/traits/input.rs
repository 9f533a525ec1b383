//! Digital button input

/// Errors reading the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputError {
    /// Input hardware not available
    Unavailable,
}

/// A digital input normalized so that `true` means pressed
///
/// Active-low wiring is the implementation's concern.
pub trait DigitalInput {
    /// Read the current level
    fn read(&mut self) -> Result<bool, InputError>;
}
