//! Per-modality analyzer outputs.
//!
//! # Responsibility
//! - Give text, speech and face analyzers one explicit output record each.
//! - Provide the neutral defaults analyzers fall back to.
//!
//! # Invariants
//! - Records are immutable once produced; mood inference only reads them.
//! - Neutral defaults are always well-formed (never empty or missing).

use crate::model::emotion::{Emotion, EmotionClassification, EmotionDistribution};
use crate::model::sentiment::SentimentResult;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};

/// Text analyzer output: sentiment, top emotion and full distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnalysis {
    pub sentiment: SentimentResult,
    pub emotion: EmotionClassification,
    pub distribution: EmotionDistribution,
}

impl TextAnalysis {
    /// `{sentiment: neutral, emotion: neutral}` with confidence 0.5.
    pub fn neutral() -> Self {
        Self {
            sentiment: SentimentResult::neutral(),
            emotion: EmotionClassification::neutral(),
            distribution: EmotionDistribution::neutral(),
        }
    }
}

/// Speech emotion label. Speech classifiers report `calm` in addition to the
/// canonical emotion vocabulary.
///
/// Serialized as a plain string (`"calm"`, `"happy"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechLabel {
    Emotion(Emotion),
    Calm,
}

impl SpeechLabel {
    pub fn from_label(label: &str) -> Option<Self> {
        if label.trim().eq_ignore_ascii_case("calm") {
            return Some(Self::Calm);
        }
        Emotion::from_label(label).map(Self::Emotion)
    }

    /// Canonical emotion closest to this label; `calm` reads as neutral.
    pub fn as_emotion(self) -> Emotion {
        match self {
            Self::Emotion(emotion) => emotion,
            Self::Calm => Emotion::Neutral,
        }
    }
}

impl Display for SpeechLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Emotion(emotion) => write!(f, "{emotion}"),
            Self::Calm => f.write_str("calm"),
        }
    }
}

impl Serialize for SpeechLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SpeechLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::from_label(&raw)
            .ok_or_else(|| de::Error::custom(format!("unknown speech label `{raw}`")))
    }
}

/// Speech analyzer output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechResult {
    pub label: SpeechLabel,
    pub confidence: f64,
    pub distribution: EmotionDistribution,
}

impl SpeechResult {
    pub fn neutral() -> Self {
        Self {
            label: SpeechLabel::Emotion(Emotion::Neutral),
            confidence: 0.5,
            distribution: EmotionDistribution::neutral(),
        }
    }
}

/// One detected face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceObservation {
    pub emotion: Emotion,
    pub emotion_confidence: f64,
    pub distribution: EmotionDistribution,
    /// Estimated age in years, when the model provides one.
    pub age: Option<u32>,
}

impl FaceObservation {
    pub fn neutral() -> Self {
        Self {
            emotion: Emotion::Neutral,
            emotion_confidence: 0.5,
            distribution: EmotionDistribution::neutral(),
            age: None,
        }
    }
}

/// Face analyzer output. Only the first face feeds mood inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceResult {
    pub faces: Vec<FaceObservation>,
}

impl FaceResult {
    /// Single neutral face with nominal confidence.
    pub fn neutral() -> Self {
        Self {
            faces: vec![FaceObservation::neutral()],
        }
    }

    pub fn first_face(&self) -> Option<&FaceObservation> {
        self.faces.first()
    }
}

#[cfg(test)]
mod tests {
    use super::SpeechLabel;
    use crate::model::emotion::Emotion;

    #[test]
    fn speech_label_accepts_calm_and_emotion_aliases() {
        assert_eq!(SpeechLabel::from_label("Calm"), Some(SpeechLabel::Calm));
        assert_eq!(
            SpeechLabel::from_label("fear"),
            Some(SpeechLabel::Emotion(Emotion::Fearful))
        );
        assert_eq!(SpeechLabel::from_label("bored"), None);
    }
}
