use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use beeper::{ArtifactPaths, BeepError, BeeperConfig, PrecomputedTranscriber, Session};

/// Render transcribed notes as a beep list and a WAV file
#[derive(Parser, Debug)]
#[command(name = "beeper")]
#[command(about = "Renders detected notes as beeps", long_about = None)]
struct Args {
    /// Configuration file (YAML)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    /// Output directory, overrides the config
    #[arg(short = 'o', long = "out-dir", global = true)]
    out_dir: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a note list into notes.txt and notes.wav
    Render {
        /// Note list (YAML or JSON) transcribed from the source audio
        #[arg(short = 'n', long = "notes")]
        notes: PathBuf,

        /// Source audio; its sample rate is used for the output WAV
        #[arg(short = 'a', long = "audio")]
        audio: Option<PathBuf>,

        /// Output sample rate, overrides the config. Not allowed with
        /// --audio, whose own sample rate is used instead
        #[arg(short = 'r', long = "sample-rate", conflicts_with = "audio")]
        sample_rate: Option<u32>,
    },
    /// Print the path of a rendered artifact
    Artifact {
        /// Artifact file name, e.g. notes.txt or notes.wav
        name: String,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Load the config file if given, then apply command line overrides
fn load_config(args: &Args) -> Result<BeeperConfig> {
    let mut config = match &args.config {
        Some(path) => BeeperConfig::load(path)?,
        None => BeeperConfig::default(),
    };

    if let Some(dir) = &args.out_dir {
        config.output.dir = dir.clone();
    }
    if let Command::Render {
        sample_rate: Some(rate),
        ..
    } = &args.command
    {
        config.synth.sample_rate = *rate;
    }

    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();
    init_logging(args.verbose);

    let config = load_config(&args)?;
    let paths = ArtifactPaths::from_config(&config.output);

    match &args.command {
        Command::Render { notes, audio, .. } => {
            let transcriber = PrecomputedTranscriber::from_file(notes)
                .with_context(|| format!("Failed to load note list: {}", notes.display()))?;
            let session = Session::new(&transcriber, config.synth.clone(), paths);

            let summary = match session.run(audio.as_deref()) {
                Ok(summary) => summary,
                Err(BeepError::SourceNotFound(path)) => {
                    return Err(anyhow!("Audio file not found: {}", path.display()));
                }
                Err(err) => return Err(err).context("Rendering failed"),
            };

            println!(
                "Transcription complete: {} beeps, {} samples at {} Hz",
                summary.events, summary.samples, summary.sample_rate
            );
            println!("  {}", summary.text_path.display());
            println!("  {}", summary.audio_path.display());
        }
        Command::Artifact { name } => {
            let (_, path) = paths.resolve(name)?;
            if !path.is_file() {
                return Err(anyhow!("File not found: {}", path.display()));
            }
            println!("{}", path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(line: &str) -> std::result::Result<Args, clap::Error> {
        Args::try_parse_from(line.split_whitespace())
    }

    #[test]
    fn test_sample_rate_conflicts_with_audio() {
        let line = "beeper render -n notes.yaml -a in.wav -r 8000";
        let err = parse(line).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_sample_rate_overrides_config() {
        let args = parse("beeper render -n notes.yaml -r 8000").unwrap();
        let config = load_config(&args).unwrap();
        assert_eq!(config.synth.sample_rate, 8000);
    }

    #[test]
    fn test_out_dir_after_subcommand() {
        let args = parse("beeper artifact notes.wav -o out").unwrap();
        let config = load_config(&args).unwrap();
        assert_eq!(config.output.dir, PathBuf::from("out"));
    }
}
