//! Diary repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Append diary rows to the single `entries` table.
//! - Fetch rows oldest-first with an optional row cap.
//!
//! # Invariants
//! - Write paths call `NewDiaryEntry::validate()` before SQL mutations.
//! - Timestamps are assigned by SQLite at insert time (UTC, second
//!   precision, `Z` suffix).
//! - Fetch order is `timestamp ASC, id ASC`.
//! - Unreadable emotion JSON degrades to an empty map and unknown labels to
//!   `neutral`; both are logged, neither fails the read.

use crate::db::DbError;
use crate::model::diary::{DiaryEntry, EntryValidationError, NewDiaryEntry};
use crate::model::mood::MoodLabel;
use crate::model::sentiment::SentimentLabel;
use log::warn;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

const ENTRY_SELECT_SQL: &str = "SELECT
    id,
    timestamp,
    text,
    sentiment_label,
    sentiment_polarity,
    emotion_json,
    mood_label,
    mood_score
FROM entries";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for diary persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(EntryValidationError),
    Db(DbError),
    /// Emotion map could not be encoded as JSON.
    Encode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode emotions: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<EntryValidationError> for RepoError {
    fn from(value: EntryValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for the append-only diary.
pub trait DiaryRepository {
    /// Appends one entry and returns it as stored (with id and timestamp).
    fn insert_entry(&self, entry: &NewDiaryEntry) -> RepoResult<DiaryEntry>;
    /// Returns entries oldest-first, capped to `limit` rows when set.
    fn fetch_entries(&self, limit: Option<u32>) -> RepoResult<Vec<DiaryEntry>>;
    /// Returns the number of stored entries.
    fn count_entries(&self) -> RepoResult<u64>;
}

/// SQLite-backed diary repository.
pub struct SqliteDiaryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDiaryRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl DiaryRepository for SqliteDiaryRepository<'_> {
    fn insert_entry(&self, entry: &NewDiaryEntry) -> RepoResult<DiaryEntry> {
        entry.validate()?;
        let emotion_json = encode_emotions(&entry.emotions)?;

        let (id, timestamp) = self.conn.query_row(
            "INSERT INTO entries (
                timestamp,
                text,
                sentiment_label,
                sentiment_polarity,
                emotion_json,
                mood_label,
                mood_score
            ) VALUES (strftime('%Y-%m-%dT%H:%M:%SZ', 'now'), ?1, ?2, ?3, ?4, ?5, ?6)
            RETURNING id, timestamp;",
            params![
                entry.text.as_str(),
                entry.sentiment_label.as_str(),
                entry.sentiment_polarity,
                emotion_json,
                entry.mood_label.as_str(),
                entry.mood_score,
            ],
            |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)),
        )?;

        Ok(DiaryEntry {
            id,
            timestamp,
            text: entry.text.clone(),
            sentiment_label: entry.sentiment_label,
            sentiment_polarity: entry.sentiment_polarity,
            emotions: entry.emotions.clone(),
            mood_label: entry.mood_label,
            mood_score: entry.mood_score,
        })
    }

    fn fetch_entries(&self, limit: Option<u32>) -> RepoResult<Vec<DiaryEntry>> {
        let mut sql = format!("{ENTRY_SELECT_SQL} ORDER BY timestamp ASC, id ASC");
        let mut bind_values: Vec<Value> = Vec::new();
        if let Some(limit) = limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(parse_entry_row(row)?);
        }
        Ok(entries)
    }

    fn count_entries(&self) -> RepoResult<u64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM entries;", [], |row| row.get::<_, i64>(0))?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}

/// Encodes emotions as a JSON object with sorted keys.
pub fn encode_emotions(emotions: &BTreeMap<String, f64>) -> RepoResult<String> {
    serde_json::to_string(emotions).map_err(RepoError::Encode)
}

/// Decodes stored emotion JSON; unreadable payloads yield an empty map.
pub fn decode_emotions(raw: Option<&str>) -> BTreeMap<String, f64> {
    let Some(raw) = raw else {
        return BTreeMap::new();
    };
    match serde_json::from_str::<BTreeMap<String, f64>>(raw) {
        Ok(emotions) => emotions,
        Err(err) => {
            warn!(
                "event=diary_read module=repo status=fallback field=emotion_json error_code=invalid_json error={}",
                err
            );
            BTreeMap::new()
        }
    }
}

fn parse_entry_row(row: &Row<'_>) -> RepoResult<DiaryEntry> {
    let id: i64 = row.get("id")?;

    let sentiment_label = match row.get::<_, Option<String>>("sentiment_label")? {
        Some(value) => SentimentLabel::parse(&value).unwrap_or_else(|| {
            warn!(
                "event=diary_read module=repo status=fallback field=sentiment_label entry_id={} value={}",
                id, value
            );
            SentimentLabel::Neutral
        }),
        None => SentimentLabel::Neutral,
    };

    let mood_label = match row.get::<_, Option<String>>("mood_label")? {
        Some(value) => MoodLabel::parse(&value).unwrap_or_else(|| {
            warn!(
                "event=diary_read module=repo status=fallback field=mood_label entry_id={} value={}",
                id, value
            );
            MoodLabel::Neutral
        }),
        None => MoodLabel::Neutral,
    };

    let emotion_json: Option<String> = row.get("emotion_json")?;

    Ok(DiaryEntry {
        id,
        timestamp: row.get("timestamp")?,
        text: row.get::<_, Option<String>>("text")?.unwrap_or_default(),
        sentiment_label,
        sentiment_polarity: row
            .get::<_, Option<f64>>("sentiment_polarity")?
            .unwrap_or(0.0),
        emotions: decode_emotions(emotion_json.as_deref()),
        mood_label,
        mood_score: row.get::<_, Option<f64>>("mood_score")?.unwrap_or(0.0),
    })
}
