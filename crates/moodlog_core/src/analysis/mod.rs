//! Modality analyzers (text, speech, face).
//!
//! # Responsibility
//! - Wrap optional external classifiers behind explicit model traits.
//! - Normalize classifier output onto the canonical emotion vocabulary.
//! - Collapse every internal failure into a well-formed neutral default.
//!
//! # Invariants
//! - `analyze` never fails and never panics; `try_analyze` keeps the
//!   underlying `AnalyzerError` visible for logging and tests.
//! - Analyzers own their model handles; callers construct one analyzer and
//!   reuse it. Analyzers are single-threaded (`Box<dyn ...>` without `Sync`).
//! - No retries: each external call is attempted once.

pub mod face;
pub mod speech;
pub mod text;

use crate::model::emotion::{Emotion, EmotionDistribution};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub use face::{FaceAnalyzer, FaceModel, RawFace};
pub use speech::{SpeechAnalyzer, SpeechModel};
pub use text::{EmotionModel, SentimentModel, TextAnalyzer};

pub type AnalyzerResult<T> = Result<T, AnalyzerError>;

/// Internal analyzer failure, absorbed at the analyzer boundary.
#[derive(Debug)]
pub enum AnalyzerError {
    /// Optional model or library is not configured.
    Unavailable(&'static str),
    /// Input is empty (blank text, zero-length file).
    EmptyInput,
    /// File extension is not one of the supported container formats.
    UnsupportedFormat(String),
    /// Input file could not be read.
    Io(std::io::Error),
    /// External model reported an error or returned unusable output.
    Model(String),
}

impl AnalyzerError {
    /// Stable short code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "dependency_unavailable",
            Self::EmptyInput => "empty_input",
            Self::UnsupportedFormat(_) => "unsupported_format",
            Self::Io(_) => "io_failed",
            Self::Model(_) => "model_failed",
        }
    }
}

impl Display for AnalyzerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(name) => write!(f, "{name} is not available"),
            Self::EmptyInput => write!(f, "input is empty"),
            Self::UnsupportedFormat(extension) => {
                write!(f, "unsupported file format `{extension}`")
            }
            Self::Io(err) => write!(f, "{err}"),
            Self::Model(message) => write!(f, "model error: {message}"),
        }
    }
}

impl Error for AnalyzerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AnalyzerError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Raw label/score pair as emitted by an external classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

impl LabelScore {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Folds classifier scores onto canonical emotions.
///
/// Unknown labels and non-finite scores are dropped; scores are clamped to
/// `[0, 1]`; aliases of the same emotion keep the highest score.
pub(crate) fn distribution_from_scores(scores: &[LabelScore]) -> EmotionDistribution {
    let mut distribution = EmotionDistribution::new();
    for entry in scores {
        let Some(emotion) = Emotion::from_label(&entry.label) else {
            continue;
        };
        if !entry.score.is_finite() {
            continue;
        }
        let value = entry.score.clamp(0.0, 1.0);
        if value >= distribution.get(emotion) {
            // Range is checked above.
            let _ = distribution.set(emotion, value);
        }
    }
    distribution
}

/// Returns the lowercase extension when it is one of `allowed`.
pub(crate) fn checked_extension(path: &Path, allowed: &[&str]) -> AnalyzerResult<String> {
    let extension = path
        .extension()
        .and_then(|value| value.to_str())
        .map(|value| value.to_ascii_lowercase())
        .unwrap_or_default();
    if allowed.contains(&extension.as_str()) {
        Ok(extension)
    } else {
        Err(AnalyzerError::UnsupportedFormat(extension))
    }
}

/// Fails with `EmptyInput` for zero-length files.
pub(crate) fn ensure_non_empty_file(path: &Path) -> AnalyzerResult<()> {
    let metadata = std::fs::metadata(path)?;
    if metadata.len() == 0 {
        return Err(AnalyzerError::EmptyInput);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{checked_extension, distribution_from_scores, AnalyzerError, LabelScore};
    use crate::model::emotion::Emotion;
    use std::path::Path;

    #[test]
    fn scores_fold_onto_canonical_emotions() {
        let distribution = distribution_from_scores(&[
            LabelScore::new("joy", 0.7),
            LabelScore::new("happiness", 0.2),
            LabelScore::new("sadness", 1.4),
            LabelScore::new("boredom", 0.9),
            LabelScore::new("fear", f64::NAN),
        ]);
        assert_eq!(distribution.get(Emotion::Happy), 0.7);
        assert_eq!(distribution.get(Emotion::Sad), 1.0);
        assert_eq!(distribution.get(Emotion::Fearful), 0.0);
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        assert_eq!(
            checked_extension(Path::new("/tmp/a.WAV"), &["wav", "mp3"]).unwrap(),
            "wav"
        );
        let err = checked_extension(Path::new("/tmp/a.flac"), &["wav"]).unwrap_err();
        assert!(matches!(err, AnalyzerError::UnsupportedFormat(ext) if ext == "flac"));
    }
}
