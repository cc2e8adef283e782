//! Beeper: renders transcribed notes as beeps
//!
//! A note list (MIDI pitch plus onset/offset seconds) becomes two artifacts:
//! a `beep(<frequency>, <duration>)` command list and one peak-normalized,
//! mono 16-bit WAV holding a tone per note.
//!
//! - `types`: notes, pitch to frequency mapping, events, waveforms
//! - `dsp`: single tone synthesis
//! - `render`: sequence assembly, normalization and PCM quantization
//! - `transcribe`: the transcriber boundary and source audio loading
//! - `output`: artifact paths and writers
//! - `session`: one end-to-end run

pub mod config;
pub mod dsp;
pub mod error;
pub mod output;
pub mod render;
pub mod session;
pub mod transcribe;
pub mod types;

pub use config::BeeperConfig;
pub use error::{BeepError, Result};
pub use output::{ArtifactKind, ArtifactPaths};
pub use render::{Rendering, SequenceAssembler, assemble};
pub use session::{RenderSummary, Session};
pub use transcribe::{PrecomputedTranscriber, SourceAudio, Transcriber};
pub use types::{BeepEvent, Note, midi_note_to_frequency};
