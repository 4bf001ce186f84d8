//! Valence/arousal (circumplex) mood mapping.
//!
//! # Invariants
//! - `valence` is clamped to `[-1, 1]` and `arousal` to `[0, 1]`, whatever
//!   the raw weighted sums are.
//! - Quadrants are checked in a fixed priority order; `depressed` catches
//!   everything no earlier quadrant matched.

use crate::model::emotion::{Emotion, EmotionDistribution};
use crate::model::mood::{MoodDetail, MoodLabel, MoodResult};

/// Infers mood from sentiment polarity and one emotion distribution.
pub fn infer(polarity: f64, emotions: &EmotionDistribution) -> MoodResult {
    let valence = valence(polarity, emotions);
    let arousal = arousal(emotions);
    let label = label_for(valence, arousal);
    MoodResult {
        label,
        score: label.fixed_score(),
        detail: MoodDetail::Circumplex { valence, arousal },
    }
}

/// `clamp(0.6 * (happy - (sad + angry + fearful + disgust)) + 0.4 * polarity, -1, 1)`.
pub fn valence(polarity: f64, emotions: &EmotionDistribution) -> f64 {
    let negative_total = emotions.get(Emotion::Sad)
        + emotions.get(Emotion::Angry)
        + emotions.get(Emotion::Fearful)
        + emotions.get(Emotion::Disgust);
    let positive_total = emotions.get(Emotion::Happy);
    let polarity = if polarity.is_finite() { polarity } else { 0.0 };
    clamp_finite(
        0.6 * (positive_total - negative_total) + 0.4 * polarity,
        -1.0,
        1.0,
    )
}

/// `clamp(0.9 * (angry + fearful + surprise) + 0.5 * happy + 0.2 * neutral + 0.1 * sad, 0, 1)`.
pub fn arousal(emotions: &EmotionDistribution) -> f64 {
    let raw = 0.9
        * (emotions.get(Emotion::Angry)
            + emotions.get(Emotion::Fearful)
            + emotions.get(Emotion::Surprise))
        + 0.5 * emotions.get(Emotion::Happy)
        + 0.2 * emotions.get(Emotion::Neutral)
        + 0.1 * emotions.get(Emotion::Sad);
    clamp_finite(raw, 0.0, 1.0)
}

/// Quadrant decision in priority order.
pub fn label_for(valence: f64, arousal: f64) -> MoodLabel {
    if valence.abs() < 0.08 && arousal < 0.15 {
        MoodLabel::Neutral
    } else if valence >= 0.15 && arousal < 0.4 {
        MoodLabel::Calm
    } else if valence >= 0.15 && arousal >= 0.4 {
        MoodLabel::Energetic
    } else if valence < -0.15 && arousal >= 0.35 {
        MoodLabel::Stressed
    } else {
        MoodLabel::Depressed
    }
}

fn clamp_finite(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return 0.0_f64.clamp(min, max);
    }
    value.clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::{arousal, infer, label_for, valence};
    use crate::model::emotion::{Emotion, EmotionDistribution};
    use crate::model::mood::MoodLabel;

    fn distribution(pairs: &[(Emotion, f64)]) -> EmotionDistribution {
        EmotionDistribution::from_pairs(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn mixed_excitement_and_nerves_is_energetic() {
        let emotions = distribution(&[
            (Emotion::Happy, 0.3),
            (Emotion::Sad, 0.0),
            (Emotion::Angry, 0.0),
            (Emotion::Fearful, 0.2),
            (Emotion::Disgust, 0.0),
            (Emotion::Surprise, 0.1),
            (Emotion::Neutral, 0.2),
        ]);
        let result = infer(0.4, &emotions);
        assert!((result.valence().unwrap() - 0.22).abs() < 1e-9);
        assert!((result.arousal().unwrap() - 0.46).abs() < 1e-9);
        assert_eq!(result.label, MoodLabel::Energetic);
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn oversized_distribution_is_clamped() {
        let emotions = distribution(&[
            (Emotion::Angry, 1.0),
            (Emotion::Fearful, 1.0),
            (Emotion::Surprise, 1.0),
            (Emotion::Sad, 1.0),
            (Emotion::Disgust, 1.0),
        ]);
        let v = valence(-1.0, &emotions);
        let a = arousal(&emotions);
        assert_eq!(v, -1.0);
        assert_eq!(a, 1.0);
        assert_eq!(label_for(v, a), MoodLabel::Stressed);

        let happy = distribution(&[(Emotion::Happy, 1.0), (Emotion::Neutral, 1.0)]);
        assert_eq!(valence(1.0, &happy), 1.0);
        assert!((0.0..=1.0).contains(&arousal(&happy)));
    }

    #[test]
    fn empty_distribution_is_neutral() {
        let result = infer(0.0, &EmotionDistribution::new());
        assert_eq!(result.label, MoodLabel::Neutral);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn pure_neutral_distribution_lands_in_catch_all() {
        // arousal 0.2 breaks the neutral gate; valence 0 matches no positive
        // or stressed quadrant.
        let result = infer(0.0, &EmotionDistribution::neutral());
        assert_eq!(result.label, MoodLabel::Depressed);
        assert_eq!(result.score, -1.0);
    }

    #[test]
    fn quadrants_follow_priority_order() {
        assert_eq!(label_for(0.05, 0.1), MoodLabel::Neutral);
        assert_eq!(label_for(0.2, 0.39), MoodLabel::Calm);
        assert_eq!(label_for(0.15, 0.4), MoodLabel::Energetic);
        assert_eq!(label_for(-0.2, 0.35), MoodLabel::Stressed);
        assert_eq!(label_for(-0.2, 0.34), MoodLabel::Depressed);
        assert_eq!(label_for(-0.15, 0.9), MoodLabel::Depressed);
        assert_eq!(label_for(0.1, 0.5), MoodLabel::Depressed);
    }

    #[test]
    fn non_finite_polarity_is_ignored() {
        let emotions = distribution(&[(Emotion::Happy, 0.5)]);
        assert!((valence(f64::NAN, &emotions) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn repeated_inference_is_bit_identical() {
        let emotions = distribution(&[(Emotion::Sad, 0.7), (Emotion::Neutral, 0.3)]);
        let first = infer(-0.35, &emotions);
        let second = infer(-0.35, &emotions);
        assert_eq!(first, second);
        assert_eq!(
            first.valence().unwrap().to_bits(),
            second.valence().unwrap().to_bits()
        );
    }
}
