//! Breathing animation phases

/// Where the breathing animation is
///
/// A run goes `IntroChime`, then `Inhale`, `ExhalePause`, `Exhale`,
/// `InhalePause` once per cycle, then `ExitChime` and `Restoring`, and
/// finally back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnimationPhase {
    /// Not animating; the idle pulse owns the screen
    #[default]
    Idle,
    /// Playing the rising chime and setting up the breathing screen
    IntroChime,
    /// Square growing
    Inhale,
    /// Hold at full size before exhaling
    ExhalePause,
    /// Square shrinking
    Exhale,
    /// Hold at smallest size before the next inhale
    InhalePause,
    /// Breathing screen cleared, falling chime playing
    ExitChime,
    /// Putting the idle screen back
    Restoring,
}

impl AnimationPhase {
    /// Check if an animation is in progress
    pub fn is_active(&self) -> bool {
        !matches!(self, AnimationPhase::Idle)
    }
}
