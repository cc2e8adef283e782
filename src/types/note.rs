//! MIDI note to frequency conversion using equal temperament
//! A440 tuning: MIDI note 69 = 440 Hz

use serde::Deserialize;

const A4: f64 = 440.0;
const A4_MIDI: i32 = 69;

/// A detected note as reported by a transcriber.
///
/// `offset_time` may not be after `onset_time` for malformed detections;
/// such notes are skipped by the assembler rather than rejected here.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Note {
    /// MIDI note number
    #[serde(alias = "midi_note")]
    pub pitch: i32,
    /// Onset in seconds
    pub onset_time: f64,
    /// Offset in seconds
    pub offset_time: f64,
}

impl Note {
    pub fn new(pitch: i32, onset_time: f64, offset_time: f64) -> Self {
        Self {
            pitch,
            onset_time,
            offset_time,
        }
    }

    /// Length of the note in seconds, negative for malformed detections
    pub fn duration(&self) -> f64 {
        self.offset_time - self.onset_time
    }

    /// Whether the note spans a positive, finite amount of time
    pub fn is_audible_span(&self) -> bool {
        let duration = self.duration();
        duration.is_finite() && duration > 0.0
    }
}

/// Equal-tempered tuning anchored at A4
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    reference_pitch: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            reference_pitch: A4,
        }
    }
}

impl Tuning {
    /// Create a tuning with A4 at `reference_pitch` Hz
    pub fn new(reference_pitch: f64) -> Self {
        Self { reference_pitch }
    }

    /// Frequency in Hz of a MIDI note number.
    /// Any integer is accepted, including notes far outside the MIDI range.
    pub fn frequency(&self, note: i32) -> f64 {
        let semitones = (note as i64 - A4_MIDI as i64) as f64;
        self.reference_pitch * 2.0_f64.powf(semitones / 12.0)
    }
}

/// Convert MIDI note number to frequency in Hz
/// Uses equal temperament: f = 440 * 2^((n-69)/12)
pub fn midi_note_to_frequency(note: i32) -> f64 {
    Tuning::default().frequency(note)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_conversion() {
        assert_eq!(midi_note_to_frequency(69), 440.0);
    }

    #[test]
    fn test_c4_middle_c() {
        let freq = midi_note_to_frequency(60);
        assert!((freq - 261.63).abs() < 0.01); // Middle C
    }

    #[test]
    fn test_octave_doubling() {
        for note in -40..160 {
            let low = midi_note_to_frequency(note);
            let high = midi_note_to_frequency(note + 12);
            assert!((high / low - 2.0).abs() < 1e-12, "note {}", note);
        }
    }

    #[test]
    fn test_out_of_range_notes_are_valid() {
        let ultrasonic = midi_note_to_frequency(200);
        assert!(ultrasonic.is_finite() && ultrasonic > 20_000.0);

        let subsonic = midi_note_to_frequency(-60);
        assert!(subsonic > 0.0 && subsonic < 1.0);

        assert!(midi_note_to_frequency(i32::MIN) >= 0.0);
    }

    #[test]
    fn test_custom_reference() {
        let tuning = Tuning::new(432.0);
        assert_eq!(tuning.frequency(69), 432.0);
        assert!((tuning.frequency(81) - 864.0).abs() < 1e-9);
    }

    #[test]
    fn test_note_duration() {
        assert!(Note::new(60, 0.25, 1.0).is_audible_span());
        assert_eq!(Note::new(60, 0.25, 1.0).duration(), 0.75);
        assert!(!Note::new(60, 1.0, 0.5).is_audible_span());
        assert!(!Note::new(60, 1.0, 1.0).is_audible_span());
        assert!(!Note::new(60, f64::NAN, 1.0).is_audible_span());
    }

    #[test]
    fn test_midi_note_alias() {
        let notes: Vec<Note> =
            serde_yaml::from_str("- {midi_note: 64, onset_time: 0.5, offset_time: 0.75}").unwrap();
        assert_eq!(notes, vec![Note::new(64, 0.5, 0.75)]);
    }
}
