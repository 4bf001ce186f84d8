//! One "Analyze" interaction: modalities -> mood -> recommendations.
//!
//! # Responsibility
//! - Run the analyzers for whichever inputs are present.
//! - Infer mood with the configured strategy and look up recommendations.
//! - Build the diary row persisted by a later "Save" action.
//!
//! # Invariants
//! - Absent inputs produce absent modality results (they never vote).
//! - `analyze` never fails; analyzers absorb their own failures.

use crate::analysis::{FaceAnalyzer, SpeechAnalyzer, TextAnalyzer};
use crate::model::diary::NewDiaryEntry;
use crate::model::emotion::Emotion;
use crate::model::modality::{FaceResult, SpeechResult, TextAnalysis};
use crate::model::mood::MoodResult;
use crate::model::sentiment::SentimentLabel;
use crate::mood::{MoodInput, MoodStrategy};
use crate::recommend::{Recommendations, Recommender};
use log::info;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

/// Inputs of one interaction. Blank text counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub text: Option<String>,
    pub audio_path: Option<PathBuf>,
    pub image_path: Option<PathBuf>,
}

impl AnalysisRequest {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }
}

/// Everything one interaction produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Input text as submitted (trimmed), empty when absent.
    pub text: String,
    pub text_result: Option<TextAnalysis>,
    pub speech_result: Option<SpeechResult>,
    pub face_result: Option<FaceResult>,
    pub mood: MoodResult,
    pub primary_emotion: Emotion,
    pub recommendations: Recommendations,
}

impl AnalysisReport {
    /// Diary row for this report.
    ///
    /// Sentiment and emotions come from the text result; without text the
    /// row records a neutral sentiment and an empty emotion map.
    pub fn to_diary_entry(&self) -> NewDiaryEntry {
        let (sentiment_label, sentiment_polarity, emotions) = match &self.text_result {
            Some(text) => (
                text.sentiment.label,
                text.sentiment.polarity,
                text.distribution.to_named_map(),
            ),
            None => (SentimentLabel::Neutral, 0.0, Default::default()),
        };
        NewDiaryEntry {
            text: self.text.clone(),
            sentiment_label,
            sentiment_polarity,
            emotions,
            mood_label: self.mood.label,
            mood_score: self.mood.score,
        }
    }
}

/// Owns the analyzers and mood/recommendation settings for a session.
pub struct AnalysisService {
    text: TextAnalyzer,
    speech: SpeechAnalyzer,
    face: FaceAnalyzer,
    strategy: MoodStrategy,
    recommender: Recommender,
}

impl Default for AnalysisService {
    fn default() -> Self {
        Self::new(MoodStrategy::default(), Recommender::new())
    }
}

impl AnalysisService {
    /// Heuristic-only analyzers with the given strategy and recommender.
    pub fn new(strategy: MoodStrategy, recommender: Recommender) -> Self {
        Self {
            text: TextAnalyzer::new(),
            speech: SpeechAnalyzer::new(),
            face: FaceAnalyzer::new(),
            strategy,
            recommender,
        }
    }

    pub fn with_text_analyzer(mut self, analyzer: TextAnalyzer) -> Self {
        self.text = analyzer;
        self
    }

    pub fn with_speech_analyzer(mut self, analyzer: SpeechAnalyzer) -> Self {
        self.speech = analyzer;
        self
    }

    pub fn with_face_analyzer(mut self, analyzer: FaceAnalyzer) -> Self {
        self.face = analyzer;
        self
    }

    pub fn strategy(&self) -> MoodStrategy {
        self.strategy
    }

    /// Runs one interaction to completion.
    pub fn analyze(&self, request: &AnalysisRequest) -> AnalysisReport {
        let started_at = Instant::now();
        let text = request
            .text
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();

        let text_result = (!text.is_empty()).then(|| self.text.analyze(&text));
        let speech_result = request
            .audio_path
            .as_deref()
            .map(|path| self.speech.analyze(path));
        let face_result = request
            .image_path
            .as_deref()
            .map(|path| self.face.analyze(path));

        let mood = self.strategy.infer(&MoodInput {
            text: text_result.as_ref(),
            speech: speech_result.as_ref(),
            face: face_result.as_ref(),
        });
        let primary_emotion = primary_emotion(text_result.as_ref(), face_result.as_ref());
        let recommendations = self.recommender.recommend(mood.label);

        info!(
            "event=analyze module=service status=ok strategy={} text={} speech={} face={} mood={} duration_ms={}",
            self.strategy,
            text_result.is_some(),
            speech_result.is_some(),
            face_result.is_some(),
            mood.label,
            started_at.elapsed().as_millis()
        );

        AnalysisReport {
            text,
            text_result,
            speech_result,
            face_result,
            mood,
            primary_emotion,
            recommendations,
        }
    }
}

/// Text emotion, overridden by the first face when one is present.
pub fn primary_emotion(text: Option<&TextAnalysis>, face: Option<&FaceResult>) -> Emotion {
    let mut primary = text.map_or(Emotion::Neutral, |text| text.emotion.label);
    if let Some(face) = face.and_then(FaceResult::first_face) {
        primary = face.emotion;
    }
    primary
}
