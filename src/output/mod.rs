//! Artifact locations and writers
//!
//! Each run writes two files into an explicit output directory: the text
//! event log and a mono 16-bit WAV. Only these two names can be resolved
//! for retrieval.

use std::fs;
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::config::OutputConfig;
use crate::error::{BeepError, Result};
use crate::types::{BeepEvent, event_log};

/// The two artifacts a run produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Text,
    Audio,
}

/// Output directory plus the two artifact file names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    dir: PathBuf,
    text_file: String,
    audio_file: String,
}

impl ArtifactPaths {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::from_config(&OutputConfig {
            dir: dir.into(),
            ..OutputConfig::default()
        })
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self {
            dir: config.dir.clone(),
            text_file: config.text_file.clone(),
            audio_file: config.audio_file.clone(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn text_path(&self) -> PathBuf {
        self.dir.join(&self.text_file)
    }

    pub fn audio_path(&self) -> PathBuf {
        self.dir.join(&self.audio_file)
    }

    /// Map a requested file name to its artifact.
    /// Anything but the two configured names is rejected.
    pub fn resolve(&self, name: &str) -> Result<(ArtifactKind, PathBuf)> {
        if name == self.text_file {
            Ok((ArtifactKind::Text, self.text_path()))
        } else if name == self.audio_file {
            Ok((ArtifactKind::Audio, self.audio_path()))
        } else {
            Err(BeepError::UnknownArtifact(name.to_string()))
        }
    }

    /// Create the output directory if it does not exist yet
    pub fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        Ok(())
    }
}

/// Write one newline-terminated line per event, overwriting `path`.
/// No events produce an empty file.
pub fn write_event_log(path: &Path, events: &[BeepEvent]) -> Result<()> {
    fs::write(path, event_log(events))?;
    Ok(())
}

/// Write mono signed 16-bit PCM, overwriting `path`
pub fn write_wav(path: &Path, samples: &[i16], sample_rate: u32) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::WavReader;

    #[test]
    fn test_resolve_known_names_only() {
        let paths = ArtifactPaths::new("/srv/beeper");

        let (kind, path) = paths.resolve("notes.txt").unwrap();
        assert_eq!(kind, ArtifactKind::Text);
        assert_eq!(path, PathBuf::from("/srv/beeper/notes.txt"));

        let (kind, path) = paths.resolve("notes.wav").unwrap();
        assert_eq!(kind, ArtifactKind::Audio);
        assert_eq!(path, PathBuf::from("/srv/beeper/notes.wav"));

        for name in ["notes.mp3", "../notes.txt", "", "NOTES.TXT", "/etc/passwd"] {
            assert!(matches!(
                paths.resolve(name),
                Err(BeepError::UnknownArtifact(n)) if n == name
            ));
        }
    }

    #[test]
    fn test_resolve_configured_names() {
        let paths = ArtifactPaths::from_config(&OutputConfig {
            dir: PathBuf::from("out"),
            text_file: "beeps.txt".to_string(),
            audio_file: "beeps.wav".to_string(),
        });
        let (_, path) = paths.resolve("beeps.wav").unwrap();
        assert_eq!(path, PathBuf::from("out/beeps.wav"));
        assert!(paths.resolve("notes.wav").is_err());
    }

    #[test]
    fn test_event_log_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");

        let events = [
            BeepEvent::new(440.0, 1.0),
            BeepEvent::new(261.6255653005986, 0.25),
        ];
        write_event_log(&path, &events).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "beep(440.0, 1.0)\nbeep(261.63, 0.25)\n"
        );

        // Overwritten, not appended
        write_event_log(&path, &[]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_wav_round_trip_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.wav");

        write_wav(&path, &[0, 32767, -32767, 12], 22050).unwrap();

        let mut reader = WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 22050);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_format, SampleFormat::Int);

        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, vec![0, 32767, -32767, 12]);
    }

    #[test]
    fn test_ensure_dir_creates_nested() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ArtifactPaths::new(dir.path().join("a/b"));
        paths.ensure_dir().unwrap();
        assert!(paths.dir().is_dir());
    }
}
