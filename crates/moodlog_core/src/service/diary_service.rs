//! Diary use-case service.
//!
//! # Responsibility
//! - Provide save/fetch/export entry points over the diary repository.
//! - Scope one SQLite connection to each store operation (`DiaryStore`).
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - Each `DiaryStore` call opens, uses and drops its own connection; no
//!   transaction spans two calls.
//! - Exports are pretty-printed UTF-8 JSON arrays, oldest entry first.

use crate::db::{open_db, DbError};
use crate::model::diary::{DiaryEntry, NewDiaryEntry};
use crate::repo::diary_repo::{DiaryRepository, RepoError, RepoResult, SqliteDiaryRepository};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Service error for diary use-cases.
#[derive(Debug)]
pub enum DiaryServiceError {
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Entries could not be serialized for export.
    Export(serde_json::Error),
    /// Export artifact could not be written.
    Write { path: PathBuf, source: std::io::Error },
}

impl Display for DiaryServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Export(err) => write!(f, "failed to serialize diary export: {err}"),
            Self::Write { path, source } => {
                write!(f, "failed to write export `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for DiaryServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Export(err) => Some(err),
            Self::Write { source, .. } => Some(source),
        }
    }
}

impl From<RepoError> for DiaryServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<DbError> for DiaryServiceError {
    fn from(value: DbError) -> Self {
        Self::Repo(RepoError::Db(value))
    }
}

/// Use-case wrapper around a diary repository.
pub struct DiaryService<R: DiaryRepository> {
    repo: R,
}

impl<R: DiaryRepository> DiaryService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Appends one entry; returns it with store-assigned id and timestamp.
    pub fn save_entry(&self, entry: &NewDiaryEntry) -> RepoResult<DiaryEntry> {
        self.repo.insert_entry(entry)
    }

    /// Lists entries oldest-first, optionally capped.
    pub fn list_entries(&self, limit: Option<u32>) -> RepoResult<Vec<DiaryEntry>> {
        self.repo.fetch_entries(limit)
    }

    pub fn count_entries(&self) -> RepoResult<u64> {
        self.repo.count_entries()
    }

    /// Serializes entries (oldest-first, optionally capped) for download.
    pub fn export_json(&self, limit: Option<u32>) -> Result<String, DiaryServiceError> {
        let entries = self.repo.fetch_entries(limit)?;
        export_json(&entries).map_err(DiaryServiceError::Export)
    }
}

/// Pretty-printed JSON array of diary entries.
pub fn export_json(entries: &[DiaryEntry]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(entries)
}

/// File-backed diary with one connection per operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiaryStore {
    db_path: PathBuf,
}

impl DiaryStore {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Appends one entry.
    pub fn insert(&self, entry: &NewDiaryEntry) -> Result<DiaryEntry, DiaryServiceError> {
        self.with_service("diary_insert", |service| {
            service.save_entry(entry).map_err(DiaryServiceError::from)
        })
    }

    /// Fetches entries oldest-first, optionally capped to `limit` rows.
    pub fn fetch(&self, limit: Option<u32>) -> Result<Vec<DiaryEntry>, DiaryServiceError> {
        self.with_service("diary_fetch", |service| {
            service.list_entries(limit).map_err(DiaryServiceError::from)
        })
    }

    /// Pretty JSON export of all entries.
    pub fn export_json(&self) -> Result<String, DiaryServiceError> {
        self.with_service("diary_export", |service| service.export_json(None))
    }

    /// Writes the JSON export to `path` as UTF-8.
    pub fn write_export(&self, path: &Path) -> Result<usize, DiaryServiceError> {
        let json = self.export_json()?;
        std::fs::write(path, json.as_bytes()).map_err(|source| DiaryServiceError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(json.len())
    }

    fn with_service<T>(
        &self,
        event: &'static str,
        f: impl FnOnce(&DiaryService<SqliteDiaryRepository<'_>>) -> Result<T, DiaryServiceError>,
    ) -> Result<T, DiaryServiceError> {
        let started_at = Instant::now();
        let conn = open_db(&self.db_path)?;
        let service = DiaryService::new(SqliteDiaryRepository::new(&conn));
        let result = f(&service);
        match &result {
            Ok(_) => info!(
                "event={} module=service status=ok duration_ms={}",
                event,
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event={} module=service status=error duration_ms={} error={}",
                event,
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::export_json;
    use crate::model::diary::DiaryEntry;
    use crate::model::mood::MoodLabel;
    use crate::model::sentiment::SentimentLabel;
    use std::collections::BTreeMap;

    #[test]
    fn export_omits_row_id_and_keeps_user_fields() {
        let entry = DiaryEntry {
            id: 7,
            timestamp: "2026-10-18T09:30:00Z".to_string(),
            text: "calm morning".to_string(),
            sentiment_label: SentimentLabel::Positive,
            sentiment_polarity: 0.4,
            emotions: BTreeMap::from([("happy".to_string(), 0.6)]),
            mood_label: MoodLabel::Calm,
            mood_score: 0.5,
        };
        let json = export_json(&[entry]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let object = value[0].as_object().unwrap();
        assert!(!object.contains_key("id"));
        assert_eq!(object["mood_label"], "calm");
        assert_eq!(object["sentiment_label"], "positive");
        assert_eq!(object["emotions"]["happy"], 0.6);
        assert!(json.contains('\n'), "export should be pretty-printed");
    }

    #[test]
    fn empty_export_is_an_empty_array() {
        assert_eq!(export_json(&[]).unwrap(), "[]");
    }
}
