//! Weighted-accumulator mood rules.
//!
//! Each present modality adds `weight * confidence` for its label; absent
//! modalities contribute nothing. The final score is thresholded into one of
//! the five mood labels.

use crate::model::emotion::Emotion;
use crate::model::modality::{FaceResult, SpeechLabel, SpeechResult, TextAnalysis};
use crate::model::mood::{MoodDetail, MoodLabel, MoodResult};
use crate::model::sentiment::SentimentLabel;

const ENERGETIC_MIN: f64 = 0.8;
const CALM_MIN: f64 = 0.3;
const DEPRESSED_MAX: f64 = -0.8;
const STRESSED_MAX: f64 = -0.3;

/// Infers mood from any subset of modality results.
pub fn infer(
    text: Option<&TextAnalysis>,
    speech: Option<&SpeechResult>,
    face: Option<&FaceResult>,
) -> MoodResult {
    let score = accumulate(text, speech, face);
    MoodResult {
        label: label_for_score(score),
        score,
        detail: MoodDetail::Weighted {
            confidence: confidence_for_score(score),
        },
    }
}

/// Sums weighted contributions of all present modalities.
pub fn accumulate(
    text: Option<&TextAnalysis>,
    speech: Option<&SpeechResult>,
    face: Option<&FaceResult>,
) -> f64 {
    let mut score = 0.0;

    if let Some(text) = text {
        score += sentiment_weight(text.sentiment.label) * sanitize(text.sentiment.confidence);
        score += text_emotion_weight(text.emotion.label) * sanitize(text.emotion.confidence);
    }

    if let Some(speech) = speech {
        score += speech_weight(speech.label) * sanitize(speech.confidence);
    }

    if let Some(face) = face.and_then(FaceResult::first_face) {
        score += face_weight(face.emotion) * sanitize(face.emotion_confidence);
    }

    score
}

/// Maps an accumulated score onto a mood label.
///
/// Upper thresholds are inclusive: `0.8 -> energetic`, `0.3 -> calm`,
/// `-0.3 -> stressed`, `-0.8 -> depressed`. Non-finite scores are neutral.
pub fn label_for_score(score: f64) -> MoodLabel {
    if score >= ENERGETIC_MIN {
        MoodLabel::Energetic
    } else if score >= CALM_MIN {
        MoodLabel::Calm
    } else if score <= DEPRESSED_MAX {
        MoodLabel::Depressed
    } else if score <= STRESSED_MAX {
        MoodLabel::Stressed
    } else {
        MoodLabel::Neutral
    }
}

/// `clamp(0.5 + |score| / 2, 0.5, 0.99)`.
pub fn confidence_for_score(score: f64) -> f64 {
    if !score.is_finite() {
        return 0.5;
    }
    (0.5 + score.abs() / 2.0).clamp(0.5, 0.99)
}

fn sentiment_weight(label: SentimentLabel) -> f64 {
    match label {
        SentimentLabel::Positive => 1.0,
        SentimentLabel::Negative => -1.0,
        SentimentLabel::Neutral => 0.0,
    }
}

fn text_emotion_weight(emotion: Emotion) -> f64 {
    match emotion {
        Emotion::Happy => 0.8,
        Emotion::Sad => -0.8,
        Emotion::Angry => -0.9,
        Emotion::Fearful => -0.6,
        Emotion::Disgust | Emotion::Surprise | Emotion::Neutral => 0.0,
    }
}

fn speech_weight(label: SpeechLabel) -> f64 {
    match label {
        SpeechLabel::Emotion(Emotion::Happy) => 0.6,
        SpeechLabel::Emotion(Emotion::Angry) => -0.7,
        SpeechLabel::Emotion(Emotion::Fearful) => -0.5,
        SpeechLabel::Calm => 0.2,
        SpeechLabel::Emotion(_) => 0.0,
    }
}

fn face_weight(emotion: Emotion) -> f64 {
    match emotion {
        Emotion::Happy => 0.7,
        Emotion::Sad => -0.6,
        Emotion::Angry => -0.7,
        Emotion::Surprise => 0.1,
        Emotion::Fearful | Emotion::Disgust | Emotion::Neutral => 0.0,
    }
}

// Non-finite confidences contribute nothing so the score stays finite.
fn sanitize(confidence: f64) -> f64 {
    if confidence.is_finite() {
        confidence
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::{accumulate, confidence_for_score, infer, label_for_score};
    use crate::model::emotion::{Emotion, EmotionClassification, EmotionDistribution};
    use crate::model::modality::{
        FaceObservation, FaceResult, SpeechLabel, SpeechResult, TextAnalysis,
    };
    use crate::model::mood::MoodLabel;
    use crate::model::sentiment::{SentimentLabel, SentimentResult};

    fn text(sentiment: SentimentLabel, s_conf: f64, emotion: Emotion, e_conf: f64) -> TextAnalysis {
        TextAnalysis {
            sentiment: SentimentResult {
                label: sentiment,
                confidence: s_conf,
                polarity: 0.0,
            },
            emotion: EmotionClassification {
                label: emotion,
                confidence: e_conf,
            },
            distribution: EmotionDistribution::neutral(),
        }
    }

    fn face(emotion: Emotion, confidence: f64) -> FaceObservation {
        FaceObservation {
            emotion,
            emotion_confidence: confidence,
            distribution: EmotionDistribution::neutral(),
            age: None,
        }
    }

    #[test]
    fn thresholds_include_their_boundaries() {
        assert_eq!(label_for_score(0.8), MoodLabel::Energetic);
        assert_eq!(label_for_score(0.79999), MoodLabel::Calm);
        assert_eq!(label_for_score(0.3), MoodLabel::Calm);
        assert_eq!(label_for_score(0.29999), MoodLabel::Neutral);
        assert_eq!(label_for_score(-0.3), MoodLabel::Stressed);
        assert_eq!(label_for_score(-0.29999), MoodLabel::Neutral);
        assert_eq!(label_for_score(-0.8), MoodLabel::Depressed);
        assert_eq!(label_for_score(-0.79999), MoodLabel::Stressed);
    }

    #[test]
    fn no_modalities_yield_neutral_with_floor_confidence() {
        let result = infer(None, None, None);
        assert_eq!(result.label, MoodLabel::Neutral);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.confidence(), Some(0.5));
    }

    #[test]
    fn positive_text_with_joy_is_energetic() {
        let text = text(SentimentLabel::Positive, 0.9, Emotion::Happy, 0.8);
        let result = infer(Some(&text), None, None);
        // 1.0 * 0.9 + 0.8 * 0.8
        assert!((result.score - 1.54).abs() < 1e-9);
        assert_eq!(result.label, MoodLabel::Energetic);
        assert_eq!(result.confidence(), Some(0.99));
    }

    #[test]
    fn speech_and_face_contribute_their_weights() {
        let speech = SpeechResult {
            label: SpeechLabel::Emotion(Emotion::Angry),
            confidence: 0.5,
            distribution: EmotionDistribution::neutral(),
        };
        let face = FaceResult {
            faces: vec![face(Emotion::Sad, 1.0), face(Emotion::Happy, 1.0)],
        };
        // -0.7 * 0.5 - 0.6 * 1.0; the second face is ignored.
        let score = accumulate(None, Some(&speech), Some(&face));
        assert!((score + 0.95).abs() < 1e-9);
        assert_eq!(label_for_score(score), MoodLabel::Depressed);
    }

    #[test]
    fn calm_speech_nudges_score_up() {
        let speech = SpeechResult {
            label: SpeechLabel::Calm,
            confidence: 1.0,
            distribution: EmotionDistribution::neutral(),
        };
        assert!((accumulate(None, Some(&speech), None) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn empty_face_list_contributes_nothing() {
        let face = FaceResult { faces: Vec::new() };
        assert_eq!(accumulate(None, None, Some(&face)), 0.0);
    }

    #[test]
    fn non_finite_confidence_keeps_score_finite() {
        let text = text(SentimentLabel::Negative, f64::NAN, Emotion::Sad, 0.5);
        let result = infer(Some(&text), None, None);
        assert!(result.score.is_finite());
        assert!((result.score + 0.4).abs() < 1e-12);
        assert_eq!(result.label, MoodLabel::Stressed);
    }

    #[test]
    fn confidence_is_clamped() {
        assert_eq!(confidence_for_score(0.0), 0.5);
        assert!((confidence_for_score(-0.6) - 0.8).abs() < 1e-12);
        assert_eq!(confidence_for_score(5.0), 0.99);
    }

    #[test]
    fn repeated_inference_is_bit_identical() {
        let text = text(SentimentLabel::Negative, 0.73, Emotion::Fearful, 0.41);
        let face = FaceResult {
            faces: vec![face(Emotion::Surprise, 0.66)],
        };
        let first = infer(Some(&text), None, Some(&face));
        let second = infer(Some(&text), None, Some(&face));
        assert_eq!(first, second);
        assert_eq!(first.score.to_bits(), second.score.to_bits());
    }
}
