//! Command-line argument definitions.
//!
//! # Invariants
//! - Parsing never touches the file system or the diary.
//! - `--config` is global and may follow any subcommand.

use clap::{Parser, Subcommand};
use moodlog_core::MoodStrategy;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "moodlog")]
#[command(about = "Infer a mood from text, speech and face inputs and keep a mood diary")]
#[command(version)]
pub struct Cli {
    /// JSON config file; `MOODLOG_*` environment variables override it.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Analyze one interaction and optionally save it to the diary.
    Analyze {
        /// Mood inference rules (`weighted` or `circumplex`).
        #[arg(long, value_parser = parse_strategy)]
        strategy: Option<MoodStrategy>,

        /// Audio clip (wav, mp3 or ogg).
        #[arg(long = "audio", value_name = "FILE")]
        audio_path: Option<PathBuf>,

        /// Face image (jpg, jpeg or png).
        #[arg(long = "image", value_name = "FILE")]
        image_path: Option<PathBuf>,

        /// Append the analysis to the diary.
        #[arg(long)]
        save: bool,

        /// Text to analyze; words are joined with single spaces.
        #[arg(value_name = "TEXT")]
        words: Vec<String>,
    },
    /// List diary entries oldest-first.
    Diary {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Write the whole diary to a JSON file.
    Export {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
    /// Print the core library version.
    Version,
}

impl Command {
    /// Analyze text, `None` when no words were given.
    pub fn analyze_text(words: &[String]) -> Option<String> {
        (!words.is_empty()).then(|| words.join(" "))
    }
}

fn parse_strategy(value: &str) -> Result<MoodStrategy, String> {
    MoodStrategy::parse(value)
        .ok_or_else(|| format!("unsupported strategy `{value}`; expected weighted|circumplex"))
}
