//! Speech emotion analysis over a local audio file.
//!
//! # Invariants
//! - Only `wav`, `mp3` and `ogg` files are accepted.
//! - Without a configured model, or on any failure, the result is
//!   `SpeechResult::neutral()`.

use super::{
    checked_extension, distribution_from_scores, ensure_non_empty_file, AnalyzerError,
    AnalyzerResult, LabelScore,
};
use crate::model::modality::{SpeechLabel, SpeechResult};
use log::{debug, warn};
use std::path::Path;

/// Audio container formats accepted by the speech analyzer.
pub const SUPPORTED_AUDIO_EXTENSIONS: &[&str] = &["wav", "mp3", "ogg"];

/// Opaque speech emotion classifier.
pub trait SpeechModel {
    fn classify(&self, audio_path: &Path) -> AnalyzerResult<Vec<LabelScore>>;
}

/// Speech analyzer owning its optional model handle.
#[derive(Default)]
pub struct SpeechAnalyzer {
    model: Option<Box<dyn SpeechModel>>,
}

impl SpeechAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, model: Box<dyn SpeechModel>) -> Self {
        self.model = Some(model);
        self
    }

    /// Analyzes one audio file; never fails.
    pub fn analyze(&self, audio_path: &Path) -> SpeechResult {
        match self.try_analyze(audio_path) {
            Ok(result) => {
                debug!(
                    "event=speech_analyze module=analysis status=ok label={} confidence={:.3}",
                    result.label, result.confidence
                );
                result
            }
            Err(err) => {
                warn!(
                    "event=speech_analyze module=analysis status=fallback error_code={} error={}",
                    err.code(),
                    err
                );
                SpeechResult::neutral()
            }
        }
    }

    /// Analyzes one audio file and surfaces internal failures.
    pub fn try_analyze(&self, audio_path: &Path) -> AnalyzerResult<SpeechResult> {
        checked_extension(audio_path, SUPPORTED_AUDIO_EXTENSIONS)?;
        ensure_non_empty_file(audio_path)?;

        let model = self
            .model
            .as_ref()
            .ok_or(AnalyzerError::Unavailable("speech emotion model"))?;
        let scores = model.classify(audio_path)?;
        speech_result_from_scores(&scores)
    }
}

/// Picks the best-scoring recognized label; builds the canonical distribution
/// from the same scores (`calm` has no canonical slot and is left out).
pub fn speech_result_from_scores(scores: &[LabelScore]) -> AnalyzerResult<SpeechResult> {
    let best = scores
        .iter()
        .filter(|entry| entry.score.is_finite())
        .filter_map(|entry| {
            SpeechLabel::from_label(&entry.label).map(|label| (label, entry.score.clamp(0.0, 1.0)))
        })
        .fold(None, |best: Option<(SpeechLabel, f64)>, candidate| match best {
            Some(current) if current.1 >= candidate.1 => Some(current),
            _ => Some(candidate),
        });

    let Some((label, confidence)) = best else {
        return Err(AnalyzerError::Model(
            "speech classifier returned no known labels".to_string(),
        ));
    };

    Ok(SpeechResult {
        label,
        confidence,
        distribution: distribution_from_scores(scores),
    })
}
