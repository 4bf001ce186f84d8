//! Use-case entry points behind the CLI commands.
//!
//! # Responsibility
//! - Map one command onto core services and wrap the outcome in a response
//!   envelope that serializes to stable JSON.
//!
//! # Invariants
//! - Entry functions never panic; failures become `ok: false` envelopes.
//! - Every diary call goes through `DiaryStore`, one connection per call.

use moodlog_core::{
    AnalysisReport, AnalysisRequest, AnalysisService, DiaryEntry, DiaryStore, MoodStrategy,
    MoodlogConfig,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Response envelope for `analyze`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzeResponse {
    pub ok: bool,
    pub message: String,
    pub report: Option<AnalysisReport>,
    /// Row id when the report was saved to the diary.
    pub saved_entry_id: Option<i64>,
}

/// Response envelope for `diary`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiaryListResponse {
    pub ok: bool,
    pub message: String,
    pub entries: Vec<DiaryEntry>,
    pub applied_limit: Option<u32>,
}

/// Response envelope for `export`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportResponse {
    pub ok: bool,
    pub message: String,
    pub path: PathBuf,
    pub bytes_written: usize,
}

/// Runs one analysis and optionally appends it to the diary.
pub fn entry_analyze(
    config: &MoodlogConfig,
    request: &AnalysisRequest,
    strategy: Option<MoodStrategy>,
    save: bool,
) -> AnalyzeResponse {
    let service = AnalysisService::new(
        strategy.unwrap_or(config.mood_strategy),
        config.recommender(),
    );
    let report = service.analyze(request);

    if !save {
        return AnalyzeResponse {
            ok: true,
            message: format!("Mood: {}.", report.mood.label),
            report: Some(report),
            saved_entry_id: None,
        };
    }

    let store = DiaryStore::new(&config.db_path);
    match store.insert(&report.to_diary_entry()) {
        Ok(saved) => AnalyzeResponse {
            ok: true,
            message: format!("Mood: {}. Saved to diary.", report.mood.label),
            report: Some(report),
            saved_entry_id: Some(saved.id),
        },
        Err(err) => AnalyzeResponse {
            ok: false,
            message: format!("entry_analyze save failed: {err}"),
            report: Some(report),
            saved_entry_id: None,
        },
    }
}

/// Lists diary entries oldest-first.
pub fn entry_diary(config: &MoodlogConfig, limit: Option<u32>) -> DiaryListResponse {
    match DiaryStore::new(&config.db_path).fetch(limit) {
        Ok(entries) => DiaryListResponse {
            ok: true,
            message: if entries.is_empty() {
                "No diary entries yet.".to_string()
            } else {
                format!("Found {} entr(ies).", entries.len())
            },
            entries,
            applied_limit: limit,
        },
        Err(err) => DiaryListResponse {
            ok: false,
            message: format!("entry_diary failed: {err}"),
            entries: Vec::new(),
            applied_limit: limit,
        },
    }
}

/// Writes the full diary as a JSON document.
pub fn entry_export(config: &MoodlogConfig, path: &Path) -> ExportResponse {
    match DiaryStore::new(&config.db_path).write_export(path) {
        Ok(bytes_written) => ExportResponse {
            ok: true,
            message: "Diary exported.".to_string(),
            path: path.to_path_buf(),
            bytes_written,
        },
        Err(err) => ExportResponse {
            ok: false,
            message: format!("entry_export failed: {err}"),
            path: path.to_path_buf(),
            bytes_written: 0,
        },
    }
}
