//! Mood vocabulary and inference output.
//!
//! # Invariants
//! - The mood vocabulary is closed (five labels).
//! - Any unrecognized label resolves to `MoodLabel::Neutral`.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Coarse mood label derived from sentiment/emotion signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodLabel {
    Depressed,
    Stressed,
    Neutral,
    Calm,
    Energetic,
}

impl MoodLabel {
    pub const ALL: [MoodLabel; 5] = [
        MoodLabel::Depressed,
        MoodLabel::Stressed,
        MoodLabel::Neutral,
        MoodLabel::Calm,
        MoodLabel::Energetic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Depressed => "depressed",
            Self::Stressed => "stressed",
            Self::Neutral => "neutral",
            Self::Calm => "calm",
            Self::Energetic => "energetic",
        }
    }

    /// Strict parse; returns `None` for labels outside the vocabulary.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "depressed" => Some(Self::Depressed),
            "stressed" => Some(Self::Stressed),
            "neutral" => Some(Self::Neutral),
            "calm" => Some(Self::Calm),
            "energetic" => Some(Self::Energetic),
            _ => None,
        }
    }

    /// Lenient parse that folds unknown labels into `Neutral`.
    pub fn parse_or_neutral(value: &str) -> Self {
        Self::parse(value).unwrap_or(Self::Neutral)
    }

    /// Fixed numeric mapping used by the circumplex strategy.
    pub fn fixed_score(self) -> f64 {
        match self {
            Self::Depressed => -1.0,
            Self::Stressed => -0.5,
            Self::Neutral => 0.0,
            Self::Calm => 0.5,
            Self::Energetic => 1.0,
        }
    }
}

impl Display for MoodLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strategy-specific detail attached to a mood result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MoodDetail {
    /// Weighted accumulator output confidence in `[0.5, 0.99]`.
    Weighted { confidence: f64 },
    /// Circumplex coordinates; valence in `[-1, 1]`, arousal in `[0, 1]`.
    Circumplex { valence: f64, arousal: f64 },
}

/// Output of one mood inference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoodResult {
    pub label: MoodLabel,
    pub score: f64,
    pub detail: MoodDetail,
}

impl MoodResult {
    /// Confidence for weighted results, `None` for circumplex results.
    pub fn confidence(&self) -> Option<f64> {
        match self.detail {
            MoodDetail::Weighted { confidence } => Some(confidence),
            MoodDetail::Circumplex { .. } => None,
        }
    }

    /// Valence for circumplex results, `None` for weighted results.
    pub fn valence(&self) -> Option<f64> {
        match self.detail {
            MoodDetail::Circumplex { valence, .. } => Some(valence),
            MoodDetail::Weighted { .. } => None,
        }
    }

    /// Arousal for circumplex results, `None` for weighted results.
    pub fn arousal(&self) -> Option<f64> {
        match self.detail {
            MoodDetail::Circumplex { arousal, .. } => Some(arousal),
            MoodDetail::Weighted { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MoodLabel;

    #[test]
    fn unknown_labels_fold_into_neutral() {
        assert_eq!(MoodLabel::parse_or_neutral("ecstatic"), MoodLabel::Neutral);
        assert_eq!(MoodLabel::parse_or_neutral(" CALM "), MoodLabel::Calm);
    }

    #[test]
    fn every_label_roundtrips_through_its_name() {
        for label in MoodLabel::ALL {
            assert_eq!(MoodLabel::parse(label.as_str()), Some(label));
        }
    }
}
