//! Core domain logic for moodlog.
//! Mood inference, recommendation lookup and the persisted mood diary.

pub mod analysis;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod mood;
pub mod recommend;
pub mod repo;
pub mod service;

pub use analysis::{
    AnalyzerError, AnalyzerResult, EmotionModel, FaceAnalyzer, FaceModel, LabelScore, RawFace,
    SentimentModel, SpeechAnalyzer, SpeechModel, TextAnalyzer,
};
pub use config::{ConfigError, MoodlogConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::diary::{DiaryEntry, EntryId, EntryValidationError, NewDiaryEntry};
pub use model::emotion::{Emotion, EmotionClassification, EmotionDistribution};
pub use model::modality::{FaceObservation, FaceResult, SpeechLabel, SpeechResult, TextAnalysis};
pub use model::mood::{MoodDetail, MoodLabel, MoodResult};
pub use model::sentiment::{SentimentLabel, SentimentResult};
pub use mood::{MoodInput, MoodStrategy};
pub use recommend::{Recommendations, Recommender};
pub use repo::diary_repo::{DiaryRepository, RepoError, RepoResult, SqliteDiaryRepository};
pub use service::analysis_service::{AnalysisReport, AnalysisRequest, AnalysisService};
pub use service::diary_service::{DiaryService, DiaryServiceError, DiaryStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
