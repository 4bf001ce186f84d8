//! Mood inference engine.
//!
//! # Responsibility
//! - Map modality results onto exactly one of the five mood labels.
//! - Offer two interchangeable strategies behind one `infer` entry point:
//!   weighted accumulator rules and valence/arousal circumplex mapping.
//!
//! # Invariants
//! - Inference is pure: identical input yields bit-identical output.
//! - Missing modalities never vote; they simply contribute nothing.

pub mod circumplex;
pub mod weighted;

use crate::model::emotion::EmotionDistribution;
use crate::model::modality::{FaceResult, SpeechResult, TextAnalysis};
use crate::model::mood::MoodResult;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Modality results available for one inference.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoodInput<'a> {
    pub text: Option<&'a TextAnalysis>,
    pub speech: Option<&'a SpeechResult>,
    pub face: Option<&'a FaceResult>,
}

impl<'a> MoodInput<'a> {
    /// Polarity fed to the circumplex strategy; `0.0` without text.
    pub fn polarity(&self) -> f64 {
        self.text.map_or(0.0, |text| text.sentiment.polarity)
    }

    /// First available distribution: text, first face, speech.
    ///
    /// Empty when no modality is present, which the circumplex mapping reads
    /// as `neutral`.
    pub fn primary_distribution(&self) -> EmotionDistribution {
        if let Some(text) = self.text {
            return text.distribution.clone();
        }
        if let Some(face) = self.face.and_then(FaceResult::first_face) {
            return face.distribution.clone();
        }
        if let Some(speech) = self.speech {
            return speech.distribution.clone();
        }
        EmotionDistribution::new()
    }
}

/// Selects which mood inference rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodStrategy {
    /// Confidence-weighted label rules over all modalities.
    #[default]
    Weighted,
    /// Valence/arousal quadrants over polarity and one distribution.
    Circumplex,
}

impl MoodStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weighted => "weighted",
            Self::Circumplex => "circumplex",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "weighted" => Some(Self::Weighted),
            "circumplex" => Some(Self::Circumplex),
            _ => None,
        }
    }

    /// Runs the selected strategy.
    pub fn infer(self, input: &MoodInput<'_>) -> MoodResult {
        match self {
            Self::Weighted => weighted::infer(input.text, input.speech, input.face),
            Self::Circumplex => {
                circumplex::infer(input.polarity(), &input.primary_distribution())
            }
        }
    }
}

impl Display for MoodStrategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
