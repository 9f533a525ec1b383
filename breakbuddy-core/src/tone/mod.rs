//! Chime playback
//!
//! Notes are played frame by frame: each frame sets the vibrato-shifted
//! frequency, holds the output at half duty, and sleeps one frame. The
//! output is silenced when the note ends.

pub mod note;

pub use note::{Note, C4_HZ, E4_HZ, FRAME_MS, G4_HZ};

use embedded_hal::delay::DelayNs;

use crate::config::ChimeConfig;
use crate::traits::{AudioError, AudioOutput, AMPLITUDE_ON};

/// Rising major triad played before breathing
pub const INTRO_CHIME: [f32; 3] = [C4_HZ, E4_HZ, G4_HZ];

/// Falling triad played after breathing
pub const EXIT_CHIME: [f32; 3] = [G4_HZ, E4_HZ, C4_HZ];

/// Which chime to play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Chime {
    /// Rising phrase
    Intro,
    /// Falling phrase
    Exit,
}

impl Chime {
    /// Note frequencies in playing order
    pub fn frequencies(self) -> &'static [f32] {
        match self {
            Chime::Intro => &INTRO_CHIME,
            Chime::Exit => &EXIT_CHIME,
        }
    }
}

/// Plays notes and chimes on an audio output
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSequencer {
    chime: ChimeConfig,
}

impl ToneSequencer {
    /// Create a sequencer shaping notes with `chime`
    pub fn new(chime: ChimeConfig) -> Self {
        Self { chime }
    }

    /// Time taken by a chime in milliseconds
    pub fn chime_duration_ms(&self, chime: Chime) -> u32 {
        chime
            .frequencies()
            .iter()
            .map(|&hz| {
                let note = Note::with_chime(hz, &self.chime);
                note.frame_count().saturating_mul(FRAME_MS)
            })
            .fold(0, u32::saturating_add)
    }

    /// Play one note, blocking until it has finished
    pub fn play_note<A, D>(
        &self,
        audio: &mut A,
        delay: &mut D,
        note: &Note,
    ) -> Result<(), AudioError>
    where
        A: AudioOutput,
        D: DelayNs,
    {
        for hz in note.frames() {
            audio.set_frequency(hz)?;
            audio.set_amplitude(AMPLITUDE_ON)?;
            delay.delay_ms(FRAME_MS);
        }
        audio.silence()
    }

    /// Play a chime, blocking until it has finished
    pub fn play_chime<A, D>(
        &self,
        audio: &mut A,
        delay: &mut D,
        chime: Chime,
    ) -> Result<(), AudioError>
    where
        A: AudioOutput,
        D: DelayNs,
    {
        for &hz in chime.frequencies() {
            self.play_note(audio, delay, &Note::with_chime(hz, &self.chime))?;
        }
        Ok(())
    }

    /// Play C4, E4, G4
    pub fn play_intro_chime<A: AudioOutput, D: DelayNs>(
        &self,
        audio: &mut A,
        delay: &mut D,
    ) -> Result<(), AudioError> {
        self.play_chime(audio, delay, Chime::Intro)
    }

    /// Play G4, E4, C4
    pub fn play_exit_chime<A: AudioOutput, D: DelayNs>(
        &self,
        audio: &mut A,
        delay: &mut D,
    ) -> Result<(), AudioError> {
        self.play_chime(audio, delay, Chime::Exit)
    }
}

impl Default for ToneSequencer {
    fn default() -> Self {
        Self::new(ChimeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{AudioEvent, MockAudio, Timeline};
    use crate::traits::AMPLITUDE_OFF;

    #[test]
    fn test_play_note_frames_then_silence() {
        let timeline = Timeline::starting_at_ms(0);
        let mut delay = timeline.delay();
        let mut audio = MockAudio::default();

        let note = Note::new(C4_HZ, 30);
        ToneSequencer::default()
            .play_note(&mut audio, &mut delay, &note)
            .unwrap();

        assert_eq!(audio.events.len(), 3 * 2 + 1);
        assert_eq!(audio.events[0], AudioEvent::Frequency(261));
        assert_eq!(audio.events[1], AudioEvent::Amplitude(AMPLITUDE_ON));
        assert_eq!(audio.events.last(), Some(&AudioEvent::Amplitude(AMPLITUDE_OFF)));
        assert_eq!(timeline.now_ms(), 30);
    }

    #[test]
    fn test_intro_chime_rises() {
        let timeline = Timeline::starting_at_ms(0);
        let mut delay = timeline.delay();
        let mut audio = MockAudio::default();

        ToneSequencer::default()
            .play_intro_chime(&mut audio, &mut delay)
            .unwrap();

        let freqs = audio.frequencies();
        assert_eq!(freqs.len(), 180);
        assert_eq!(freqs[0], 261);
        assert_eq!(freqs[60], 329);
        assert_eq!(freqs[120], 392);
        assert_eq!(timeline.now_ms(), 1800);
    }

    #[test]
    fn test_exit_chime_falls() {
        let timeline = Timeline::starting_at_ms(0);
        let mut delay = timeline.delay();
        let mut audio = MockAudio::default();

        ToneSequencer::default()
            .play_exit_chime(&mut audio, &mut delay)
            .unwrap();

        let freqs = audio.frequencies();
        assert_eq!([freqs[0], freqs[60], freqs[120]], [392, 329, 261]);
        let silences = audio
            .events
            .iter()
            .filter(|e| **e == AudioEvent::Amplitude(AMPLITUDE_OFF))
            .count();
        assert_eq!(silences, 3);
    }

    #[test]
    fn test_chime_duration_matches_playback() {
        let seq = ToneSequencer::new(ChimeConfig::new(605, 6.0, 4.0).unwrap());
        assert_eq!(seq.chime_duration_ms(Chime::Intro), 3 * 610);
        assert_eq!(ToneSequencer::default().chime_duration_ms(Chime::Exit), 1800);
    }
}
