//! Transcription boundary
//!
//! The note detector is an external collaborator. Anything that can turn
//! audio samples into an ordered note list implements [`Transcriber`]; the
//! rest of the pipeline only ever sees `Vec<Note>`.

use std::fs;
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavReader};
use tracing::{debug, info};

use crate::error::{BeepError, Result};
use crate::types::Note;

/// Turns mono audio into an ordered list of detected notes
pub trait Transcriber {
    fn transcribe(&self, samples: &[f32], sample_rate: u32) -> Result<Vec<Note>>;
}

/// Returns a note list that was transcribed ahead of time, ignoring the audio
#[derive(Debug, Clone, Default)]
pub struct PrecomputedTranscriber {
    notes: Vec<Note>,
}

impl PrecomputedTranscriber {
    pub fn new(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    /// Load the note list from a YAML (or JSON) sidecar file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(load_notes(path)?))
    }
}

impl Transcriber for PrecomputedTranscriber {
    fn transcribe(&self, samples: &[f32], sample_rate: u32) -> Result<Vec<Note>> {
        debug!(
            samples = samples.len(),
            sample_rate,
            notes = self.notes.len(),
            "using precomputed transcription"
        );
        Ok(self.notes.clone())
    }
}

/// Read a note list: a YAML sequence of `{pitch, onset_time, offset_time}`
pub fn load_notes(path: impl AsRef<Path>) -> Result<Vec<Note>> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(BeepError::SourceNotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    let notes = parse_notes(&content).map_err(|message| BeepError::InvalidNotes {
        path: path.to_path_buf(),
        message,
    })?;

    info!(path = %path.display(), notes = notes.len(), "loaded note list");
    Ok(notes)
}

/// Parse a note list document; an empty document is an empty list
pub fn parse_notes(content: &str) -> std::result::Result<Vec<Note>, String> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_yaml::from_str(content).map_err(|e| e.to_string())
}

/// Mono source audio handed to the transcriber
#[derive(Debug, Clone, PartialEq)]
pub struct SourceAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl SourceAudio {
    /// No samples, only a declared rate
    pub fn empty(sample_rate: u32) -> Self {
        Self {
            samples: Vec::new(),
            sample_rate,
        }
    }

    /// Read a WAV file, mixing all channels down to mono in [-1, 1].
    /// A missing file is reported as [`BeepError::SourceNotFound`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(BeepError::SourceNotFound(PathBuf::from(path)));
        }

        let mut reader = WavReader::open(path)?;
        let spec = reader.spec();
        let channels = spec.channels.max(1) as usize;

        let interleaved: Vec<f32> = match spec.sample_format {
            SampleFormat::Float => reader
                .samples::<f32>()
                .collect::<std::result::Result<_, _>>()?,
            SampleFormat::Int => {
                let scale = (1i64 << (spec.bits_per_sample.clamp(1, 32) - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / scale))
                    .collect::<std::result::Result<_, _>>()?
            }
        };

        let samples: Vec<f32> = interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
            .collect();

        info!(
            path = %path.display(),
            sample_rate = spec.sample_rate,
            channels,
            frames = samples.len(),
            "loaded source audio"
        );

        Ok(Self {
            samples,
            sample_rate: spec.sample_rate,
        })
    }
}
