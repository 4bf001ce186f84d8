//! Canonical emotion vocabulary and per-modality emotion records.
//!
//! # Responsibility
//! - Define the seven canonical emotion names shared by every modality.
//! - Map third-party classifier labels (`joy`, `sadness`, ...) onto them.
//! - Hold emotion distributions produced by analyzers.
//!
//! # Invariants
//! - Distribution values are finite and within `[0, 1]`; they are not
//!   required to sum to 1.
//! - Labels that do not map onto the vocabulary are never invented; callers
//!   fall back to `Emotion::Neutral`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One of the seven canonical emotion categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Happy,
    Sad,
    Angry,
    Fearful,
    Disgust,
    Surprise,
    Neutral,
}

impl Emotion {
    /// All canonical emotions in stable output order.
    pub const ALL: [Emotion; 7] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Fearful,
        Emotion::Disgust,
        Emotion::Surprise,
        Emotion::Neutral,
    ];

    /// Returns the canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Angry => "angry",
            Self::Fearful => "fearful",
            Self::Disgust => "disgust",
            Self::Surprise => "surprise",
            Self::Neutral => "neutral",
        }
    }

    /// Maps a canonical name or a known classifier alias onto the vocabulary.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "happy" | "joy" | "happiness" => Some(Self::Happy),
            "sad" | "sadness" => Some(Self::Sad),
            "angry" | "anger" => Some(Self::Angry),
            "fearful" | "fear" | "afraid" => Some(Self::Fearful),
            "disgust" | "disgusted" => Some(Self::Disgust),
            "surprise" | "surprised" => Some(Self::Surprise),
            "neutral" => Some(Self::Neutral),
            _ => None,
        }
    }
}

impl Display for Emotion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single label + confidence pair, as returned by a classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionClassification {
    pub label: Emotion,
    /// Probability in `[0, 1]`.
    pub confidence: f64,
}

impl EmotionClassification {
    /// Nominal result used whenever an analyzer has nothing better to say.
    pub fn neutral() -> Self {
        Self {
            label: Emotion::Neutral,
            confidence: 0.5,
        }
    }
}

/// Validation error for emotion distributions.
#[derive(Debug, Clone, PartialEq)]
pub enum DistributionError {
    /// Probability is NaN/infinite or outside `[0, 1]`.
    OutOfRange { emotion: Emotion, value: f64 },
}

impl Display for DistributionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange { emotion, value } => {
                write!(f, "probability for `{emotion}` must be within [0, 1], got {value}")
            }
        }
    }
}

impl Error for DistributionError {}

/// Mapping from canonical emotion to probability.
///
/// Missing emotions read as `0.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmotionDistribution {
    values: BTreeMap<Emotion, f64>,
}

impl EmotionDistribution {
    /// Creates an empty distribution (every emotion reads as `0.0`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Distribution fully concentrated on `neutral`.
    pub fn neutral() -> Self {
        Self::from_pairs([(Emotion::Neutral, 1.0)])
            .unwrap_or_default()
    }

    /// Builds a validated distribution from emotion/probability pairs.
    ///
    /// Later duplicates overwrite earlier ones.
    pub fn from_pairs(
        pairs: impl IntoIterator<Item = (Emotion, f64)>,
    ) -> Result<Self, DistributionError> {
        let mut distribution = Self::new();
        for (emotion, value) in pairs {
            distribution.set(emotion, value)?;
        }
        Ok(distribution)
    }

    /// Sets one probability after range validation.
    pub fn set(&mut self, emotion: Emotion, value: f64) -> Result<(), DistributionError> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(DistributionError::OutOfRange { emotion, value });
        }
        self.values.insert(emotion, value);
        Ok(())
    }

    /// Returns the probability for `emotion`, `0.0` when absent.
    pub fn get(&self, emotion: Emotion) -> f64 {
        self.values.get(&emotion).copied().unwrap_or(0.0)
    }

    /// Returns the highest-probability emotion, preferring vocabulary order
    /// on ties. Empty distributions report `neutral` with `0.0`.
    pub fn dominant(&self) -> EmotionClassification {
        let mut best = EmotionClassification {
            label: Emotion::Neutral,
            confidence: 0.0,
        };
        for emotion in Emotion::ALL {
            let value = self.get(emotion);
            if value > best.confidence {
                best = EmotionClassification {
                    label: emotion,
                    confidence: value,
                };
            }
        }
        best
    }

    /// Sum of all stored probabilities.
    pub fn total(&self) -> f64 {
        self.values.values().sum()
    }

    /// Returns whether no emotion carries a value.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Converts into the name-keyed map persisted with diary entries.
    ///
    /// Keys are canonical names; ordering is alphabetical because the map is
    /// a `BTreeMap`, which keeps the persisted JSON key order sorted.
    pub fn to_named_map(&self) -> BTreeMap<String, f64> {
        self.values
            .iter()
            .map(|(emotion, value)| (emotion.as_str().to_string(), *value))
            .collect()
    }

    /// Iterates stored emotion/probability pairs in vocabulary order.
    pub fn iter(&self) -> impl Iterator<Item = (Emotion, f64)> + '_ {
        self.values.iter().map(|(emotion, value)| (*emotion, *value))
    }
}

#[cfg(test)]
mod tests {
    use super::{Emotion, EmotionDistribution};

    #[test]
    fn aliases_map_onto_canonical_names() {
        assert_eq!(Emotion::from_label("Joy"), Some(Emotion::Happy));
        assert_eq!(Emotion::from_label(" sadness "), Some(Emotion::Sad));
        assert_eq!(Emotion::from_label("anger"), Some(Emotion::Angry));
        assert_eq!(Emotion::from_label("fear"), Some(Emotion::Fearful));
        assert_eq!(Emotion::from_label("calm"), None);
    }

    #[test]
    fn distribution_rejects_out_of_range_values() {
        assert!(EmotionDistribution::from_pairs([(Emotion::Happy, 1.5)]).is_err());
        assert!(EmotionDistribution::from_pairs([(Emotion::Sad, f64::NAN)]).is_err());
    }

    #[test]
    fn dominant_prefers_highest_value_then_vocabulary_order() {
        let distribution =
            EmotionDistribution::from_pairs([(Emotion::Sad, 0.4), (Emotion::Angry, 0.4)])
                .unwrap();
        let dominant = distribution.dominant();
        assert_eq!(dominant.label, Emotion::Sad);
        assert!((dominant.confidence - 0.4).abs() < 1e-12);
    }

    #[test]
    fn named_map_uses_canonical_keys() {
        let distribution = EmotionDistribution::from_pairs([
            (Emotion::Neutral, 0.2),
            (Emotion::Happy, 0.8),
        ])
        .unwrap();
        let keys = distribution.to_named_map().into_keys().collect::<Vec<_>>();
        assert_eq!(keys, vec!["happy".to_string(), "neutral".to_string()]);
    }
}
