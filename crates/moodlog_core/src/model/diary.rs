//! Mood diary domain model.
//!
//! # Responsibility
//! - Define the write shape (`NewDiaryEntry`) and read shape (`DiaryEntry`)
//!   of the append-only mood diary.
//! - Validate numeric fields before they reach storage.
//!
//! # Invariants
//! - Entries are never mutated or deleted once stored.
//! - `timestamp` and `id` are assigned by the store, not by callers.
//! - Emotion keys are kept in sorted order (`BTreeMap`).
//!
//! # See also
//! - crate::repo::diary_repo

use crate::model::mood::MoodLabel;
use crate::model::sentiment::SentimentLabel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Row identifier assigned by SQLite autoincrement.
pub type EntryId = i64;

/// Validation errors for diary entry payloads.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryValidationError {
    /// Polarity is not finite or outside `[-1, 1]`.
    InvalidPolarity(f64),
    /// Mood score is NaN or infinite.
    InvalidMoodScore(f64),
    /// Emotion key is blank.
    EmptyEmotionKey,
    /// Emotion probability is not finite or outside `[0, 1]`.
    InvalidEmotionValue { emotion: String, value: f64 },
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPolarity(value) => {
                write!(f, "sentiment_polarity must be within [-1, 1], got {value}")
            }
            Self::InvalidMoodScore(value) => write!(f, "mood_score must be finite, got {value}"),
            Self::EmptyEmotionKey => write!(f, "emotion keys cannot be empty"),
            Self::InvalidEmotionValue { emotion, value } => write!(
                f,
                "emotion `{emotion}` must be within [0, 1], got {value}"
            ),
        }
    }
}

impl Error for EntryValidationError {}

/// Payload for one diary insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDiaryEntry {
    pub text: String,
    pub sentiment_label: SentimentLabel,
    pub sentiment_polarity: f64,
    pub emotions: BTreeMap<String, f64>,
    pub mood_label: MoodLabel,
    pub mood_score: f64,
}

impl NewDiaryEntry {
    /// Validates numeric ranges and emotion keys.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if !self.sentiment_polarity.is_finite() || !(-1.0..=1.0).contains(&self.sentiment_polarity)
        {
            return Err(EntryValidationError::InvalidPolarity(
                self.sentiment_polarity,
            ));
        }
        if !self.mood_score.is_finite() {
            return Err(EntryValidationError::InvalidMoodScore(self.mood_score));
        }
        for (emotion, value) in &self.emotions {
            if emotion.trim().is_empty() {
                return Err(EntryValidationError::EmptyEmotionKey);
            }
            if !value.is_finite() || !(0.0..=1.0).contains(value) {
                return Err(EntryValidationError::InvalidEmotionValue {
                    emotion: emotion.clone(),
                    value: *value,
                });
            }
        }
        Ok(())
    }
}

/// One persisted diary row, as returned by fetch.
///
/// `id` is kept out of serialized exports; export objects carry the seven
/// user-facing fields only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryEntry {
    #[serde(skip)]
    pub id: EntryId,
    /// UTC ISO-8601 timestamp, `YYYY-MM-DDTHH:MM:SSZ`.
    pub timestamp: String,
    pub text: String,
    pub sentiment_label: SentimentLabel,
    pub sentiment_polarity: f64,
    pub emotions: BTreeMap<String, f64>,
    pub mood_label: MoodLabel,
    pub mood_score: f64,
}

#[cfg(test)]
mod tests {
    use super::{EntryValidationError, NewDiaryEntry};
    use crate::model::mood::MoodLabel;
    use crate::model::sentiment::SentimentLabel;
    use std::collections::BTreeMap;

    fn sample() -> NewDiaryEntry {
        NewDiaryEntry {
            text: "ok".to_string(),
            sentiment_label: SentimentLabel::Neutral,
            sentiment_polarity: 0.0,
            emotions: BTreeMap::from([("neutral".to_string(), 1.0)]),
            mood_label: MoodLabel::Neutral,
            mood_score: 0.0,
        }
    }

    #[test]
    fn valid_entry_passes() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn polarity_outside_range_is_rejected() {
        let mut entry = sample();
        entry.sentiment_polarity = 1.2;
        assert_eq!(
            entry.validate(),
            Err(EntryValidationError::InvalidPolarity(1.2))
        );
    }

    #[test]
    fn emotion_value_outside_range_is_rejected() {
        let mut entry = sample();
        entry.emotions.insert("happy".to_string(), -0.1);
        assert!(matches!(
            entry.validate(),
            Err(EntryValidationError::InvalidEmotionValue { .. })
        ));
    }

    #[test]
    fn non_finite_mood_score_is_rejected() {
        let mut entry = sample();
        entry.mood_score = f64::INFINITY;
        assert!(matches!(
            entry.validate(),
            Err(EntryValidationError::InvalidMoodScore(_))
        ));
    }
}
