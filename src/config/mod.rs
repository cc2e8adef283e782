use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::waveform::Waveform;

/// Top-level configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BeeperConfig {
    #[serde(default)]
    pub synth: SynthSettings,

    #[serde(default)]
    pub output: OutputConfig,
}

impl BeeperConfig {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = Self::from_yaml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Parse and validate a YAML document. An empty document yields the defaults
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: BeeperConfig = if content.trim().is_empty() {
            BeeperConfig::default()
        } else {
            serde_yaml::from_str(content)
                .context("Failed to parse YAML config")?
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.synth
            .validate()
            .context("Invalid synth configuration")?;
        self.output
            .validate()
            .context("Invalid output configuration")?;
        Ok(())
    }
}

/// Tone rendering settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SynthSettings {
    /// Used when no source audio declares a sample rate
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    #[serde(default = "default_amplitude")]
    pub amplitude: f64,

    #[serde(default)]
    pub wave: Waveform,

    /// Frequency of A4 in Hz
    #[serde(default = "default_reference_pitch")]
    pub reference_pitch: f64,
}

impl Default for SynthSettings {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            amplitude: default_amplitude(),
            wave: Waveform::default(),
            reference_pitch: default_reference_pitch(),
        }
    }
}

impl SynthSettings {
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 || self.sample_rate > MAX_SAMPLE_RATE {
            return Err(anyhow!(
                "Sample rate must be between 1 and {} Hz",
                MAX_SAMPLE_RATE
            ));
        }
        if !(self.amplitude > 0.0 && self.amplitude <= 1.0) {
            return Err(anyhow!(
                "Amplitude must be greater than 0.0 and at most 1.0"
            ));
        }
        if !(self.reference_pitch.is_finite() && self.reference_pitch > 0.0) {
            return Err(anyhow!("Reference pitch must be a positive frequency"));
        }
        Ok(())
    }
}

/// Where the artifacts are written
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_text_file")]
    pub text_file: String,

    #[serde(default = "default_audio_file")]
    pub audio_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            text_file: default_text_file(),
            audio_file: default_audio_file(),
        }
    }
}

impl OutputConfig {
    pub fn validate(&self) -> Result<()> {
        validate_file_name(&self.text_file)
            .context("Bad text_file")?;
        validate_file_name(&self.audio_file)
            .context("Bad audio_file")?;
        if self.text_file == self.audio_file {
            return Err(anyhow!(
                "text_file and audio_file must differ (both are '{}')",
                self.text_file
            ));
        }
        Ok(())
    }
}

/// Artifact names are bare file names resolved inside the output directory
fn validate_file_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(anyhow!("File name is empty"));
    }
    if name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(anyhow!("'{}' is not a plain file name", name));
    }
    Ok(())
}

const MAX_SAMPLE_RATE: u32 = 768_000;

// Default value functions for serde
fn default_sample_rate() -> u32 {
    44100
}

fn default_amplitude() -> f64 {
    crate::dsp::tone::DEFAULT_AMPLITUDE
}

fn default_reference_pitch() -> f64 {
    440.0
}

fn default_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_text_file() -> String {
    "notes.txt".to_string()
}

fn default_audio_file() -> String {
    "notes.wav".to_string()
}
