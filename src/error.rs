//! Error types for the note rendering pipeline

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading inputs or writing artifacts.
///
/// Degenerate notes and silent tones are not errors; they are filtered or
/// rendered as silence by the assembler.
#[derive(Debug, Error)]
pub enum BeepError {
    /// The source audio (or note list) does not exist
    #[error("source not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// An artifact name other than the two known file names was requested
    #[error("unknown artifact '{0}'")]
    UnknownArtifact(String),

    /// A note list file could not be parsed
    #[error("invalid note list {}: {message}", .path.display())]
    InvalidNotes {
        path: PathBuf,
        message: String,
    },

    /// The rendered waveform would not fit in a 16-bit WAV
    #[error("note {index} pushes the waveform past {max} samples, the limit of a 16-bit WAV")]
    TooLong {
        index: usize,
        max: usize,
    },

    /// The transcriber failed to produce notes
    #[error("transcription failed: {0}")]
    Transcription(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("wav error: {0}")]
    Wav(#[from] hound::Error),
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, BeepError>;
