//! Text sentiment and emotion analysis.
//!
//! # Responsibility
//! - Classify sentiment through an optional polarity model, falling back to
//!   keyword cues when no model is configured.
//! - Classify emotion through an optional classifier, falling back to a
//!   keyword heuristic when no classifier is configured.
//!
//! # Invariants
//! - Blank input short-circuits to `TextAnalysis::neutral()` without
//!   invoking any model.
//! - A model that errors degrades that component (sentiment or emotion) to
//!   its neutral default; the other component is unaffected.
//! - Log events carry text length only, never text content.

use super::{distribution_from_scores, AnalyzerError, AnalyzerResult, LabelScore};
use crate::model::emotion::{Emotion, EmotionClassification, EmotionDistribution};
use crate::model::modality::TextAnalysis;
use crate::model::sentiment::{SentimentLabel, SentimentResult};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

const COMPOUND_THRESHOLD: f64 = 0.05;
const HEURISTIC_CONFIDENCE: f64 = 0.55;

const POSITIVE_CUES: &[&str] = &["good", "great", "love", "excellent", "awesome", "happy"];
const NEGATIVE_CUES: &[&str] = &["bad", "terrible", "hate", "awful", "worst", "sad"];

static JOY_CUES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)happy|joy|glad|excited|love|great").expect("valid joy cue regex")
});
static SADNESS_CUES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)sad|down|unhappy|depressed|cry").expect("valid sadness cue regex")
});
static ANGER_CUES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)angry|mad|furious|rage|annoyed").expect("valid anger cue regex")
});
static FEAR_CUES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)afraid|scared|fear|anxious|nervous").expect("valid fear cue regex")
});
static DISGUST_CUES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)disgust|gross|repuls|nausea").expect("valid disgust cue regex")
});
static SURPRISE_CUES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)surprise|shocked|astonished|wow").expect("valid surprise cue regex")
});

/// Opaque sentiment scorer returning a compound polarity in `[-1, 1]`.
pub trait SentimentModel {
    fn compound_score(&self, text: &str) -> AnalyzerResult<f64>;
}

/// Opaque emotion classifier returning label/score pairs.
pub trait EmotionModel {
    fn classify(&self, text: &str) -> AnalyzerResult<Vec<LabelScore>>;
}

/// Text analyzer owning its optional model handles.
#[derive(Default)]
pub struct TextAnalyzer {
    sentiment_model: Option<Box<dyn SentimentModel>>,
    emotion_model: Option<Box<dyn EmotionModel>>,
}

impl TextAnalyzer {
    /// Creates an analyzer that relies on keyword heuristics only.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sentiment_model(mut self, model: Box<dyn SentimentModel>) -> Self {
        self.sentiment_model = Some(model);
        self
    }

    pub fn with_emotion_model(mut self, model: Box<dyn EmotionModel>) -> Self {
        self.emotion_model = Some(model);
        self
    }

    /// Analyzes text; never fails.
    pub fn analyze(&self, text: &str) -> TextAnalysis {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            debug!("event=text_analyze module=analysis status=skipped reason=empty_input");
            return TextAnalysis::neutral();
        }

        let sentiment = self.try_sentiment(trimmed).unwrap_or_else(|err| {
            log_fallback("sentiment", trimmed, &err);
            SentimentResult::neutral()
        });
        let (emotion, distribution) = self.try_emotion(trimmed).unwrap_or_else(|err| {
            log_fallback("emotion", trimmed, &err);
            (
                EmotionClassification::neutral(),
                EmotionDistribution::neutral(),
            )
        });

        debug!(
            "event=text_analyze module=analysis status=ok text_len={} sentiment={} emotion={}",
            trimmed.chars().count(),
            sentiment.label,
            emotion.label
        );
        TextAnalysis {
            sentiment,
            emotion,
            distribution,
        }
    }

    /// Analyzes text and surfaces the first internal failure.
    ///
    /// # Errors
    /// - `EmptyInput` for blank text.
    /// - Any error reported by a configured model.
    pub fn try_analyze(&self, text: &str) -> AnalyzerResult<TextAnalysis> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(AnalyzerError::EmptyInput);
        }
        let sentiment = self.try_sentiment(trimmed)?;
        let (emotion, distribution) = self.try_emotion(trimmed)?;
        Ok(TextAnalysis {
            sentiment,
            emotion,
            distribution,
        })
    }

    fn try_sentiment(&self, text: &str) -> AnalyzerResult<SentimentResult> {
        match &self.sentiment_model {
            Some(model) => {
                let compound = model.compound_score(text)?;
                if !compound.is_finite() {
                    return Err(AnalyzerError::Model(format!(
                        "non-finite compound score {compound}"
                    )));
                }
                Ok(sentiment_from_compound(compound))
            }
            None => Ok(keyword_sentiment(text)),
        }
    }

    fn try_emotion(
        &self,
        text: &str,
    ) -> AnalyzerResult<(EmotionClassification, EmotionDistribution)> {
        match &self.emotion_model {
            Some(model) => {
                let scores = model.classify(text)?;
                let distribution = distribution_from_scores(&scores);
                if distribution.is_empty() {
                    return Err(AnalyzerError::Model(
                        "classifier returned no known emotion labels".to_string(),
                    ));
                }
                Ok((distribution.dominant(), distribution))
            }
            None => Ok(keyword_emotion(text)),
        }
    }
}

/// Maps a compound score onto a sentiment result.
///
/// `>= 0.05` is positive and `<= -0.05` is negative, both with confidence
/// `clamp(|compound|, 0.5, 1.0)`. Anything between is neutral with
/// confidence `1 - |compound|`.
pub fn sentiment_from_compound(compound: f64) -> SentimentResult {
    let polarity = compound.clamp(-1.0, 1.0);
    if polarity >= COMPOUND_THRESHOLD {
        SentimentResult {
            label: SentimentLabel::Positive,
            confidence: polarity.clamp(0.5, 1.0),
            polarity,
        }
    } else if polarity <= -COMPOUND_THRESHOLD {
        SentimentResult {
            label: SentimentLabel::Negative,
            confidence: (-polarity).clamp(0.5, 1.0),
            polarity,
        }
    } else {
        SentimentResult {
            label: SentimentLabel::Neutral,
            confidence: 1.0 - polarity.abs(),
            polarity,
        }
    }
}

/// Keyword fallback for sentiment: counts distinct positive/negative cues.
pub fn keyword_sentiment(text: &str) -> SentimentResult {
    let lowered = text.to_lowercase();
    let positive = POSITIVE_CUES
        .iter()
        .filter(|cue| lowered.contains(*cue))
        .count();
    let negative = NEGATIVE_CUES
        .iter()
        .filter(|cue| lowered.contains(*cue))
        .count();

    let total = positive + negative;
    let polarity = if total == 0 {
        0.0
    } else {
        (positive as f64 - negative as f64) / total as f64
    };

    if positive > negative {
        SentimentResult {
            label: SentimentLabel::Positive,
            confidence: HEURISTIC_CONFIDENCE,
            polarity,
        }
    } else if negative > positive {
        SentimentResult {
            label: SentimentLabel::Negative,
            confidence: HEURISTIC_CONFIDENCE,
            polarity,
        }
    } else {
        SentimentResult::neutral()
    }
}

/// Keyword fallback for emotion.
///
/// The label is the first matching cue group in priority order (joy,
/// sadness, anger, fear, disgust, surprise). The distribution holds each
/// group's share of all cue hits.
pub fn keyword_emotion(text: &str) -> (EmotionClassification, EmotionDistribution) {
    let groups: [(Emotion, &Regex); 6] = [
        (Emotion::Happy, &*JOY_CUES_RE),
        (Emotion::Sad, &*SADNESS_CUES_RE),
        (Emotion::Angry, &*ANGER_CUES_RE),
        (Emotion::Fearful, &*FEAR_CUES_RE),
        (Emotion::Disgust, &*DISGUST_CUES_RE),
        (Emotion::Surprise, &*SURPRISE_CUES_RE),
    ];

    let hits = groups
        .iter()
        .map(|(emotion, regex)| (*emotion, regex.find_iter(text).count()))
        .collect::<Vec<_>>();
    let total: usize = hits.iter().map(|(_, count)| count).sum();
    if total == 0 {
        return (
            EmotionClassification::neutral(),
            EmotionDistribution::neutral(),
        );
    }

    let mut distribution = EmotionDistribution::new();
    let mut label = None;
    for (emotion, count) in hits {
        if count == 0 {
            continue;
        }
        label.get_or_insert(emotion);
        // Shares are within [0, 1] by construction.
        let _ = distribution.set(emotion, count as f64 / total as f64);
    }

    let classification = EmotionClassification {
        label: label.unwrap_or(Emotion::Neutral),
        confidence: HEURISTIC_CONFIDENCE,
    };
    (classification, distribution)
}

fn log_fallback(component: &str, text: &str, err: &AnalyzerError) {
    warn!(
        "event=text_analyze module=analysis status=fallback component={} text_len={} error_code={} error={}",
        component,
        text.chars().count(),
        err.code(),
        err
    );
}
