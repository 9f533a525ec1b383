//! Guided breathing run
//!
//! Walks a [`BreathingSequence`] and carries out each cue on the surface
//! and audio output, blocking for each cue's duration. A run leaves the
//! surface in the idle layout it started from.

use core::fmt;

use embedded_hal::delay::DelayNs;

use super::phase::AnimationPhase;
use super::scene::Scene;
use super::sequence::{BreathingSequence, CueAction};
use crate::config::{BreathingConfig, ChimeConfig, IdleConfig};
use crate::log::{debug, info};
use crate::tone::ToneSequencer;
use crate::traits::{AudioError, AudioOutput, Drawable, RenderSurface, SurfaceError};

/// A fault during a breathing run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnimationError {
    /// Drawing failed
    Surface(SurfaceError),
    /// Chime output failed
    Audio(AudioError),
}

impl From<SurfaceError> for AnimationError {
    fn from(e: SurfaceError) -> Self {
        AnimationError::Surface(e)
    }
}

impl From<AudioError> for AnimationError {
    fn from(e: AudioError) -> Self {
        AnimationError::Audio(e)
    }
}

impl fmt::Display for AnimationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnimationError::Surface(e) => write!(f, "surface fault: {:?}", e),
            AnimationError::Audio(e) => write!(f, "audio fault: {:?}", e),
        }
    }
}

/// Breathing animation engine
///
/// Generic over the surface's layer handle type so it can keep the scene
/// between runs.
#[derive(Debug)]
pub struct BreathingEngine<L> {
    config: BreathingConfig,
    tones: ToneSequencer,
    breathe_label: Drawable,
    idle_label: Drawable,
    scene: Scene<L>,
    phase: AnimationPhase,
}

impl<L: Copy> BreathingEngine<L> {
    /// Create an engine
    pub fn new(breathing: BreathingConfig, chime: ChimeConfig, idle: &IdleConfig) -> Self {
        Self {
            breathe_label: Drawable::text(&breathing.label, breathing.text_color),
            idle_label: Drawable::text(&idle.label, idle.text_color),
            config: breathing,
            tones: ToneSequencer::new(chime),
            scene: Scene::new(),
            phase: AnimationPhase::Idle,
        }
    }

    /// Current phase
    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    /// Layers currently held
    pub fn scene(&self) -> &Scene<L> {
        &self.scene
    }

    /// Breathing settings
    pub fn config(&self) -> &BreathingConfig {
        &self.config
    }

    /// Cues of one run
    pub fn sequence(&self) -> BreathingSequence<'_> {
        BreathingSequence::new(&self.config, &self.tones)
    }

    /// Put the idle label on screen
    pub fn show_idle<S>(&mut self, surface: &mut S) -> Result<(), SurfaceError>
    where
        S: RenderSurface<Layer = L>,
    {
        self.scene.show_idle(surface, &self.idle_label)
    }

    /// Perform one full breathing run, blocking
    ///
    /// On a fault the phase is left where the fault happened and the error
    /// is returned; [`BreathingEngine::recover`] puts the idle layout back.
    pub fn run<S, A, D>(
        &mut self,
        surface: &mut S,
        audio: &mut A,
        delay: &mut D,
    ) -> Result<(), AnimationError>
    where
        S: RenderSurface<Layer = L>,
        A: AudioOutput,
        D: DelayNs,
    {
        let sequence = BreathingSequence::new(&self.config, &self.tones);
        info!(
            "breathing: {} cycles, {} ms",
            self.config.cycles.cycle_count(),
            sequence.total_duration_ms()
        );

        for cue in sequence {
            if cue.phase != self.phase {
                debug!("phase {:?} at {} ms", cue.phase, cue.start_ms);
                self.phase = cue.phase;
            }
            match cue.action {
                CueAction::PlayChime(chime) => self.tones.play_chime(audio, delay, chime)?,
                CueAction::ShowBreathing => self.scene.show_breathing(
                    surface,
                    self.config.background,
                    &self.breathe_label,
                )?,
                CueAction::Pulse(step) => {
                    self.scene.replace_pulse(surface, step.drawable())?;
                    delay.delay_ms(cue.duration_ms);
                }
                CueAction::Hold => delay.delay_ms(cue.duration_ms),
                CueAction::ClearBreathing => self.scene.clear_breathing(surface)?,
                CueAction::RestoreIdle => self.scene.show_idle(surface, &self.idle_label)?,
            }
        }

        self.phase = AnimationPhase::Idle;
        Ok(())
    }

    /// Return the surface to the idle layout after a failed run
    pub fn recover<S>(&mut self, surface: &mut S) -> Result<(), SurfaceError>
    where
        S: RenderSurface<Layer = L>,
    {
        self.phase = AnimationPhase::Restoring;
        self.scene.restore_idle(surface, &self.idle_label)?;
        self.phase = AnimationPhase::Idle;
        Ok(())
    }
}
