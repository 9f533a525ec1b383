//! Breathing animation and idle pulse
//!
//! The breathing run is described by [`BreathingSequence`], a pure function
//! of the configuration, and carried out by [`BreathingEngine`]. The idle
//! screen between runs is animated by [`IdlePulse`].

pub mod engine;
pub mod idle;
pub mod keyframe;
pub mod phase;
pub mod scene;
pub mod sequence;

pub use engine::{AnimationError, BreathingEngine};
pub use idle::IdlePulse;
pub use keyframe::{exhale_keyframes, inhale_keyframes, KeyframeStep};
pub use phase::AnimationPhase;
pub use scene::Scene;
pub use sequence::{BreathingSequence, Cue, CueAction};
