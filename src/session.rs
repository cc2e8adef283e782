//! One end-to-end run: source audio -> notes -> rendering -> artifacts

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::SynthSettings;
use crate::error::Result;
use crate::output::{ArtifactPaths, write_event_log, write_wav};
use crate::render::SequenceAssembler;
use crate::transcribe::{SourceAudio, Transcriber};
use crate::types::Note;

/// What a run produced
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSummary {
    pub events: usize,
    pub samples: usize,
    pub sample_rate: u32,
    pub text_path: PathBuf,
    pub audio_path: PathBuf,
}

/// Wires a transcriber to the renderer and an output location.
///
/// A session holds no buffers between runs; each call owns its own
/// waveform, so sessions with distinct output directories never interfere.
pub struct Session<'a> {
    transcriber: &'a dyn Transcriber,
    settings: SynthSettings,
    paths: ArtifactPaths,
}

impl<'a> Session<'a> {
    pub fn new(
        transcriber: &'a dyn Transcriber,
        settings: SynthSettings,
        paths: ArtifactPaths,
    ) -> Self {
        Self {
            transcriber,
            settings,
            paths,
        }
    }

    /// Transcribe `source` and render it. Without a source the transcriber
    /// receives no samples and the configured sample rate.
    pub fn run(&self, source: Option<&Path>) -> Result<RenderSummary> {
        let audio = match source {
            Some(path) => SourceAudio::load(path)?,
            None => SourceAudio::empty(self.settings.sample_rate),
        };

        let SourceAudio {
            samples,
            sample_rate,
        } = audio;
        let notes = self.transcriber.transcribe(&samples, sample_rate)?;
        self.render_notes(&notes, sample_rate)
    }

    /// Render an already transcribed note list and write both artifacts.
    /// Nothing is written when the notes are too long to render.
    pub fn render_notes(&self, notes: &[Note], sample_rate: u32) -> Result<RenderSummary> {
        info!(notes = notes.len(), sample_rate, "rendering notes");

        let assembler = SequenceAssembler::from_settings(&self.settings, sample_rate);
        let rendering = assembler.assemble(notes)?;

        self.paths.ensure_dir()?;
        let text_path = self.paths.text_path();
        let audio_path = self.paths.audio_path();
        write_event_log(&text_path, &rendering.events)?;
        write_wav(&audio_path, &rendering.pcm16(), rendering.sample_rate)?;

        info!(
            events = rendering.events.len(),
            samples = rendering.waveform.len(),
            text = %text_path.display(),
            audio = %audio_path.display(),
            "wrote artifacts"
        );

        Ok(RenderSummary {
            events: rendering.events.len(),
            samples: rendering.waveform.len(),
            sample_rate: rendering.sample_rate,
            text_path,
            audio_path,
        })
    }
}
