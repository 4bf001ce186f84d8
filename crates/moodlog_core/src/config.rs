//! Runtime configuration for moodlog entry points.
//!
//! # Responsibility
//! - Provide defaults for database path, logging and mood strategy.
//! - Load an optional JSON config file and apply environment overrides.
//! - Reject invalid settings before any component is constructed.
//!
//! # Invariants
//! - `MoodlogConfig::validate()` passes for every value returned by
//!   `load()`.
//! - Environment variables win over file values, which win over defaults.

use crate::logging::default_log_level;
use crate::mood::MoodStrategy;
use crate::recommend::Recommender;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const ENV_DB_PATH: &str = "MOODLOG_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "MOODLOG_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "MOODLOG_LOG_DIR";
pub const ENV_MOOD_STRATEGY: &str = "MOODLOG_MOOD_STRATEGY";

const DEFAULT_DB_FILE_NAME: &str = "mood_diary.sqlite3";
const SUPPORTED_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Configuration loading/validation error.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    Read { path: PathBuf, source: std::io::Error },
    /// Config file is not valid JSON for `MoodlogConfig`.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// A setting holds an unsupported value.
    Invalid { field: &'static str, message: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse config `{}`: {source}", path.display())
            }
            Self::Invalid { field, message } => write!(f, "invalid `{field}`: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Invalid { .. } => None,
        }
    }
}

/// Settings shared by the CLI and any embedding front end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoodlogConfig {
    /// SQLite diary file.
    pub db_path: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute log directory; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
    pub mood_strategy: MoodStrategy,
    /// Items per recommendation category; `None` keeps full buckets.
    pub recommendation_limit: Option<usize>,
    /// Seed for recommendation sampling.
    pub recommendation_seed: Option<u64>,
}

impl Default for MoodlogConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
            mood_strategy: MoodStrategy::default(),
            recommendation_limit: None,
            recommendation_seed: None,
        }
    }
}

impl MoodlogConfig {
    /// Loads defaults, then `config_path` (if given), then environment
    /// overrides, and validates the result.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON config file; missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies overrides from a key lookup (normally the process env).
    ///
    /// Blank values are ignored.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(value) = read(ENV_DB_PATH) {
            self.db_path = PathBuf::from(value);
        }
        if let Some(value) = read(ENV_LOG_LEVEL) {
            self.log_level = value;
        }
        if let Some(value) = read(ENV_LOG_DIR) {
            self.log_dir = Some(PathBuf::from(value));
        }
        if let Some(value) = read(ENV_MOOD_STRATEGY) {
            self.mood_strategy =
                MoodStrategy::parse(&value).ok_or_else(|| ConfigError::Invalid {
                    field: "mood_strategy",
                    message: format!("unsupported strategy `{value}`; expected weighted|circumplex"),
                })?;
        }
        Ok(())
    }

    /// Validates every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.db_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                field: "db_path",
                message: "cannot be empty".to_string(),
            });
        }

        let level = self.log_level.trim().to_ascii_lowercase();
        let level = if level == "warning" { "warn".to_string() } else { level };
        if !SUPPORTED_LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Invalid {
                field: "log_level",
                message: format!(
                    "unsupported level `{}`; expected trace|debug|info|warn|error",
                    self.log_level
                ),
            });
        }

        if let Some(dir) = &self.log_dir {
            if !dir.is_absolute() {
                return Err(ConfigError::Invalid {
                    field: "log_dir",
                    message: format!("must be an absolute path, got `{}`", dir.display()),
                });
            }
        }

        if self.recommendation_limit == Some(0) {
            return Err(ConfigError::Invalid {
                field: "recommendation_limit",
                message: "must be at least 1 when set".to_string(),
            });
        }
        Ok(())
    }

    /// Recommender configured from the sampling settings.
    pub fn recommender(&self) -> Recommender {
        Recommender {
            limit: self.recommendation_limit,
            seed: self.recommendation_seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, MoodlogConfig, ENV_DB_PATH, ENV_LOG_LEVEL, ENV_MOOD_STRATEGY};
    use crate::mood::MoodStrategy;
    use std::collections::HashMap;
    use std::io::Write;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_valid() {
        let config = MoodlogConfig::default();
        config.validate().expect("defaults should validate");
        assert_eq!(config.mood_strategy, MoodStrategy::Weighted);
        assert!(config.db_path.ends_with("mood_diary.sqlite3"));
    }

    #[test]
    fn overrides_replace_values_and_ignore_blanks() {
        let mut config = MoodlogConfig::default();
        config
            .apply_overrides(lookup(&[
                (ENV_DB_PATH, "/var/lib/moodlog/diary.db"),
                (ENV_LOG_LEVEL, "  "),
                (ENV_MOOD_STRATEGY, "Circumplex"),
            ]))
            .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/var/lib/moodlog/diary.db"));
        assert_eq!(config.log_level, MoodlogConfig::default().log_level);
        assert_eq!(config.mood_strategy, MoodStrategy::Circumplex);
    }

    #[test]
    fn unknown_strategy_override_is_rejected() {
        let mut config = MoodlogConfig::default();
        let err = config
            .apply_overrides(lookup(&[(ENV_MOOD_STRATEGY, "vibes")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "mood_strategy", .. }));
    }

    #[test]
    fn validation_rejects_bad_settings() {
        let relative_logs = MoodlogConfig {
            log_dir: Some(PathBuf::from("logs")),
            ..MoodlogConfig::default()
        };
        assert!(relative_logs.validate().is_err());

        let bad_level = MoodlogConfig {
            log_level: "verbose".to_string(),
            ..MoodlogConfig::default()
        };
        assert!(bad_level.validate().is_err());

        let zero_k = MoodlogConfig {
            recommendation_limit: Some(0),
            ..MoodlogConfig::default()
        };
        assert!(zero_k.validate().is_err());
    }

    #[test]
    fn file_values_fill_missing_fields_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"mood_strategy": "circumplex", "recommendation_limit": 2, "recommendation_seed": 9}}"#
        )
        .unwrap();

        let config = MoodlogConfig::from_file(file.path()).unwrap();
        assert_eq!(config.mood_strategy, MoodStrategy::Circumplex);
        assert_eq!(config.recommendation_limit, Some(2));
        assert_eq!(config.log_level, MoodlogConfig::default().log_level);

        let recommender = config.recommender();
        assert_eq!(recommender.limit, Some(2));
        assert_eq!(recommender.seed, Some(9));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(
            MoodlogConfig::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }
}
