//! The breathing run as a list of timed cues
//!
//! A run is fully determined by its configuration, so it is generated on
//! the fly rather than stored: cue `n` is computed from `n` alone. The
//! engine walks the cues and blocks for each one's duration; anything that
//! wants to drive the animation from a timer can use [`BreathingSequence::cue_at`].

use super::keyframe::KeyframeStep;
use super::phase::AnimationPhase;
use crate::config::BreathingConfig;
use crate::tone::{Chime, ToneSequencer};

/// What a cue does when it starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CueAction {
    /// Play a chime (blocks for the cue's duration)
    PlayChime(Chime),
    /// Swap the idle label for the breathing screen
    ShowBreathing,
    /// Replace the pulse square with this frame
    Pulse(KeyframeStep),
    /// Keep the screen as it is
    Hold,
    /// Remove the breathing label and the pulse square
    ClearBreathing,
    /// Put the idle label back
    RestoreIdle,
}

/// One timed step of the breathing run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cue {
    /// Phase this cue belongs to
    pub phase: AnimationPhase,
    /// Offset from the start of the run (ms)
    pub start_ms: u32,
    /// How long the cue lasts (ms)
    pub duration_ms: u32,
    /// What to do
    pub action: CueAction,
}

/// Cues before the first cycle: intro chime, breathing screen
const LEAD_CUES: u32 = 2;

/// Cues after the last cycle: clear, exit chime, restore
const TAIL_CUES: u32 = 3;

/// Iterator over the cues of one breathing run
#[derive(Debug, Clone)]
pub struct BreathingSequence<'a> {
    config: &'a BreathingConfig,
    chime_ms: [u32; 2],
    index: u32,
    elapsed_ms: u32,
}

impl<'a> BreathingSequence<'a> {
    /// Sequence for `config`, with chime timing from `tones`
    pub fn new(config: &'a BreathingConfig, tones: &ToneSequencer) -> Self {
        Self {
            config,
            chime_ms: [
                tones.chime_duration_ms(Chime::Intro),
                tones.chime_duration_ms(Chime::Exit),
            ],
            index: 0,
            elapsed_ms: 0,
        }
    }

    fn steps(&self) -> u32 {
        u32::from(self.config.cycles.step_count())
    }

    /// Cues in one inhale/exhale cycle
    fn cycle_len(&self) -> u32 {
        2 * self.steps() + 2
    }

    /// Total number of cues
    pub fn cue_count(&self) -> u32 {
        LEAD_CUES + u32::from(self.config.cycles.cycle_count()) * self.cycle_len() + TAIL_CUES
    }

    /// Total run time in milliseconds
    ///
    /// Saturates at `u32::MAX`; parsed configurations are checked to stay
    /// below it (see [`DeviceConfig::check_run_length`]).
    ///
    /// [`DeviceConfig::check_run_length`]: crate::config::DeviceConfig::check_run_length
    pub fn total_duration_ms(&self) -> u32 {
        let total = u64::from(self.chime_ms[0])
            + self.config.cycles_duration_ms()
            + u64::from(self.chime_ms[1]);
        u32::try_from(total).unwrap_or(u32::MAX)
    }

    /// Phase, duration and action of cue `n`, without its start time
    fn describe(&self, n: u32) -> Option<(AnimationPhase, u32, CueAction)> {
        let steps = self.steps();
        let body = u32::from(self.config.cycles.cycle_count()) * self.cycle_len();
        let step_ms = self.config.cycles.time_per_step_ms();
        let pause_ms = self.config.pause_ms;

        if n == 0 {
            return Some((
                AnimationPhase::IntroChime,
                self.chime_ms[0],
                CueAction::PlayChime(Chime::Intro),
            ));
        }
        if n == 1 {
            return Some((AnimationPhase::IntroChime, 0, CueAction::ShowBreathing));
        }

        let n = n - LEAD_CUES;
        if n < body {
            let j = n % self.cycle_len();
            // step_count fits u16, so the narrowing below is lossless
            let cue = if j < steps {
                (
                    AnimationPhase::Inhale,
                    step_ms,
                    CueAction::Pulse(KeyframeStep::inhale(self.config, j as u16)),
                )
            } else if j == steps {
                (AnimationPhase::ExhalePause, pause_ms, CueAction::Hold)
            } else if j <= 2 * steps {
                (
                    AnimationPhase::Exhale,
                    step_ms,
                    CueAction::Pulse(KeyframeStep::exhale(self.config, (j - steps - 1) as u16)),
                )
            } else {
                (AnimationPhase::InhalePause, pause_ms, CueAction::Hold)
            };
            return Some(cue);
        }

        match n - body {
            0 => Some((AnimationPhase::ExitChime, 0, CueAction::ClearBreathing)),
            1 => Some((
                AnimationPhase::ExitChime,
                self.chime_ms[1],
                CueAction::PlayChime(Chime::Exit),
            )),
            2 => Some((AnimationPhase::Restoring, 0, CueAction::RestoreIdle)),
            _ => None,
        }
    }

    /// Cue active `elapsed_ms` into the run
    ///
    /// Zero-length cues are never active. Returns `None` once the run is over.
    pub fn cue_at(&self, elapsed_ms: u32) -> Option<Cue> {
        let mut all = self.clone();
        all.index = 0;
        all.elapsed_ms = 0;
        all.find(|cue| elapsed_ms >= cue.start_ms && elapsed_ms - cue.start_ms < cue.duration_ms)
    }
}

impl Iterator for BreathingSequence<'_> {
    type Item = Cue;

    fn next(&mut self) -> Option<Cue> {
        let (phase, duration_ms, action) = self.describe(self.index)?;
        let cue = Cue {
            phase,
            start_ms: self.elapsed_ms,
            duration_ms,
            action,
        };
        self.index += 1;
        self.elapsed_ms = self.elapsed_ms.saturating_add(duration_ms);
        Some(cue)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.cue_count().saturating_sub(self.index) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for BreathingSequence<'_> {}
