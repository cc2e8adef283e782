//! Note sequence assembly
//!
//! Turns an ordered note list into one peak-normalized waveform plus the
//! matching `beep(...)` event lines. Notes without a positive duration are
//! dropped; every other note contributes exactly one event and one tone,
//! in input order.

use tracing::{debug, warn};

use crate::config::SynthSettings;
use crate::dsp::tone::{MAX_SAMPLES, ToneSynth, checked_sample_count};
use crate::error::{BeepError, Result};
use crate::render::pcm::{normalize_peak, to_pcm16};
use crate::types::{BeepEvent, Note, Tuning, event_log};

/// Output of one assembly run
#[derive(Debug, Clone, PartialEq)]
pub struct Rendering {
    /// Normalized master waveform, never empty
    pub waveform: Vec<f32>,
    /// One event per rendered note
    pub events: Vec<BeepEvent>,
    pub sample_rate: u32,
}

impl Rendering {
    /// Signed 16-bit PCM for the audio artifact
    pub fn pcm16(&self) -> Vec<i16> {
        to_pcm16(&self.waveform)
    }

    /// Contents of the text artifact
    pub fn event_log(&self) -> String {
        event_log(&self.events)
    }
}

/// Maps notes to tones and stitches them into a single buffer
#[derive(Debug, Clone)]
pub struct SequenceAssembler {
    tuning: Tuning,
    synth: ToneSynth,
}

impl SequenceAssembler {
    /// Default tuning and sine tones at `sample_rate`
    pub fn new(sample_rate: u32) -> Self {
        Self {
            tuning: Tuning::default(),
            synth: ToneSynth::new(sample_rate),
        }
    }

    /// Build an assembler from configured synth settings, overriding the
    /// configured sample rate with the one the source audio declared
    pub fn from_settings(settings: &SynthSettings, sample_rate: u32) -> Self {
        Self {
            tuning: Tuning::new(settings.reference_pitch),
            synth: ToneSynth::new(sample_rate)
                .with_amplitude(settings.amplitude)
                .with_waveform(settings.wave),
        }
    }

    /// Render `notes` in order.
    ///
    /// Fails with [`BeepError::TooLong`] before rendering anything when the
    /// notes add up to more samples than a 16-bit WAV can hold.
    pub fn assemble(&self, notes: &[Note]) -> Result<Rendering> {
        let sample_rate = self.synth.sample_rate();
        let mut planned = Vec::with_capacity(notes.len());
        let mut total = 0usize;

        for (index, note) in notes.iter().enumerate() {
            if !note.is_audible_span() {
                debug!(
                    index,
                    pitch = note.pitch,
                    duration = note.duration(),
                    "skipping note without positive duration"
                );
                continue;
            }

            let duration = note.duration();
            total = match checked_sample_count(sample_rate, duration) {
                Some(count) if total + count <= MAX_SAMPLES => total + count,
                _ => {
                    return Err(BeepError::TooLong {
                        index,
                        max: MAX_SAMPLES,
                    });
                }
            };
            planned.push((note.pitch, duration));
        }

        let mut events = Vec::with_capacity(planned.len());
        let mut waveform = Vec::with_capacity(total);
        for (pitch, duration) in planned {
            let frequency = self.tuning.frequency(pitch);
            events.push(BeepEvent::new(frequency, duration));
            waveform.extend(self.synth.render(frequency, duration));
        }

        if !events.is_empty() && !normalize_peak(&mut waveform) {
            warn!(
                notes = events.len(),
                samples = waveform.len(),
                "rendered notes are silent, skipping normalization"
            );
        }
        // No notes at all, or every note rounded to zero samples
        if waveform.is_empty() {
            waveform.push(0.0);
        }

        debug!(
            notes = notes.len(),
            rendered = events.len(),
            samples = waveform.len(),
            "assembled note sequence"
        );

        Ok(Rendering {
            waveform,
            events,
            sample_rate,
        })
    }
}

/// Assemble `notes` with default tuning and sine tones
pub fn assemble(notes: &[Note], sample_rate: u32) -> Result<Rendering> {
    SequenceAssembler::new(sample_rate).assemble(notes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Waveform;

    fn peak(samples: &[f32]) -> f32 {
        samples.iter().fold(0.0f32, |m, s| m.max(s.abs()))
    }

    #[test]
    fn test_single_reference_note() {
        let rendering = assemble(&[Note::new(69, 0.0, 1.0)], 44100).unwrap();

        assert_eq!(rendering.event_log(), "beep(440.0, 1.0)\n");
        assert_eq!(rendering.waveform.len(), 44100);
        assert_eq!(peak(&rendering.waveform), 1.0);

        let pcm = rendering.pcm16();
        let pcm_peak = pcm.iter().map(|s| (*s as i32).abs()).max().unwrap();
        assert_eq!(pcm_peak, 32767);

        // 440 Hz over one second: 440 upward zero crossings
        let rising = pcm.windows(2).filter(|w| w[0] < 0 && w[1] >= 0).count();
        assert!((439..=441).contains(&rising), "{} crossings", rising);
    }

    #[test]
    fn test_reversed_note_yields_placeholder() {
        let rendering = assemble(&[Note::new(60, 1.0, 0.5)], 44100).unwrap();
        assert!(rendering.events.is_empty());
        assert_eq!(rendering.event_log(), "");
        assert_eq!(rendering.waveform, vec![0.0]);
        assert_eq!(rendering.pcm16(), vec![0]);
    }

    #[test]
    fn test_empty_input_yields_placeholder() {
        let rendering = assemble(&[], 16000).unwrap();
        assert!(rendering.events.is_empty());
        assert_eq!(rendering.waveform, vec![0.0]);
        assert_eq!(rendering.sample_rate, 16000);
    }

    #[test]
    fn test_invalid_notes_filtered_in_order() {
        let notes = [
            Note::new(60, 0.0, 0.5),
            Note::new(61, 0.5, 0.5),
            Note::new(62, 1.0, 0.25),
            Note::new(64, 0.5, 0.75),
            Note::new(65, f64::NAN, 1.0),
            Note::new(200, 2.0, 2.5),
        ];
        let rendering = assemble(&notes, 8000).unwrap();

        let lines: Vec<String> = rendering.events.iter().map(|e| e.to_string()).collect();
        assert_eq!(
            lines,
            vec![
                "beep(261.63, 0.5)",
                "beep(329.63, 0.25)",
                "beep(850544.02, 0.5)",
            ]
        );
        assert_eq!(rendering.event_log().lines().count(), 3);
        assert_eq!(rendering.waveform.len(), 4000 + 2000 + 4000);
    }

    #[test]
    fn test_normalization_is_global() {
        let quiet = SequenceAssembler::from_settings(
            &SynthSettings {
                amplitude: 0.1,
                ..SynthSettings::default()
            },
            8000,
        );
        let notes = [Note::new(69, 0.0, 0.5), Note::new(57, 0.5, 1.0)];
        let rendering = quiet.assemble(&notes).unwrap();
        assert_eq!(peak(&rendering.waveform), 1.0);

        // Both tones share the same scale factor, so both reach full scale
        let (first, second) = rendering.waveform.split_at(4000);
        assert!((peak(first) - 1.0).abs() < 1e-3);
        assert!((peak(second) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_silent_notes_skip_normalization() {
        // Far enough below A4 that the frequency underflows to 0 Hz
        let rendering = assemble(&[Note::new(i32::MIN, 0.0, 0.5)], 8000).unwrap();
        assert_eq!(rendering.event_log(), "beep(0.0, 0.5)\n");
        assert_eq!(rendering.waveform.len(), 4000);
        assert!(rendering.waveform.iter().all(|&s| s == 0.0));
        assert!(rendering.pcm16().iter().all(|&s| s == 0));
    }

    #[test]
    fn test_zero_length_tones_yield_placeholder() {
        // 8000 * 0.00001 rounds to no samples at all
        let rendering = assemble(&[Note::new(69, 0.0, 0.00001)], 8000).unwrap();
        assert_eq!(rendering.events.len(), 1);
        assert_eq!(rendering.waveform, vec![0.0]);
    }

    #[test]
    fn test_oversized_note_is_rejected() {
        let notes = [Note::new(60, 0.0, 0.5), Note::new(0, 0.0, 1e15)];
        let err = assemble(&notes, 44100).unwrap_err();
        assert!(matches!(err, BeepError::TooLong { index: 1, .. }));
    }

    #[test]
    fn test_total_length_is_bounded() {
        // Each note fits a WAV on its own, together they do not
        let half = (MAX_SAMPLES / 2 + 1) as f64;
        let notes = [Note::new(69, 0.0, half), Note::new(69, half, 2.0 * half)];
        let err = SequenceAssembler::new(1).assemble(&notes).unwrap_err();
        assert!(matches!(err, BeepError::TooLong { index: 1, .. }));
    }

    #[test]
    fn test_settings_are_applied() {
        let settings = SynthSettings {
            wave: Waveform::Square,
            reference_pitch: 432.0,
            ..SynthSettings::default()
        };
        let assembler = SequenceAssembler::from_settings(&settings, 1000);
        let rendering = assembler.assemble(&[Note::new(69, 0.0, 0.1)]).unwrap();
        assert_eq!(rendering.event_log(), "beep(432.0, 0.1)\n");
        assert_eq!(rendering.sample_rate, 1000);
        assert!(rendering.waveform.iter().all(|s| s.abs() == 1.0));
    }
}
