//! Runtime configuration resolved from the environment.
//!
//! # Responsibility
//! - Resolve store backend, database path, REST credentials and log settings.
//! - Build the configured `MemoStore` implementation.
//!
//! # Invariants
//! - Blank variables are treated as unset.
//! - The REST backend is never selected without both URL and key.

use crate::db::DbError;
use crate::logging::default_log_level;
use crate::repo::memo_store::{MemoStore, StoreError};
use crate::repo::rest_store::RestMemoStore;
use crate::repo::sqlite_store::SqliteMemoStore;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_STORE: &str = "MEMO_STORE";
pub const ENV_DB_PATH: &str = "MEMO_DB_PATH";
pub const ENV_REST_URL: &str = "MEMO_REST_URL";
pub const ENV_REST_KEY: &str = "MEMO_REST_KEY";
pub const ENV_REST_TABLE: &str = "MEMO_REST_TABLE";
pub const ENV_LOG_LEVEL: &str = "MEMO_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "MEMO_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "memo.sqlite3";
const DEFAULT_REST_TABLE: &str = "memos";

/// Persistence backend selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Sqlite {
        path: PathBuf,
    },
    Rest {
        base_url: String,
        api_key: String,
        table: String,
    },
}

/// Fully resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoConfig {
    pub backend: StoreBackend,
    pub log_level: String,
    /// Absolute directory for rolling log files; file logging is off when unset.
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ConfigError {
    UnknownBackend(String),
    MissingVar(&'static str),
    Store(StoreError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownBackend(value) => {
                write!(f, "unknown store backend `{value}`; expected sqlite|rest")
            }
            Self::MissingVar(name) => write!(f, "missing required variable `{name}`"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::UnknownBackend(_) | Self::MissingVar(_) => None,
        }
    }
}

impl From<StoreError> for ConfigError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<DbError> for ConfigError {
    fn from(value: DbError) -> Self {
        Self::Store(StoreError::from(value))
    }
}

impl MemoConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves configuration through `lookup`, which maps a variable name to
    /// its raw value.
    ///
    /// # Errors
    /// - `UnknownBackend` when `MEMO_STORE` is neither `sqlite` nor `rest`.
    /// - `MissingVar` when the REST backend lacks URL or key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let backend = match read(ENV_STORE)
            .map(|raw| raw.to_ascii_lowercase())
            .as_deref()
        {
            None | Some("sqlite") => StoreBackend::Sqlite {
                path: read(ENV_DB_PATH)
                    .map(PathBuf::from)
                    .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
            },
            Some("rest") => StoreBackend::Rest {
                base_url: read(ENV_REST_URL).ok_or(ConfigError::MissingVar(ENV_REST_URL))?,
                api_key: read(ENV_REST_KEY).ok_or(ConfigError::MissingVar(ENV_REST_KEY))?,
                table: read(ENV_REST_TABLE).unwrap_or_else(|| DEFAULT_REST_TABLE.to_string()),
            },
            Some(other) => return Err(ConfigError::UnknownBackend(other.to_string())),
        };

        Ok(Self {
            backend,
            log_level: read(ENV_LOG_LEVEL).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: read(ENV_LOG_DIR).map(PathBuf::from),
        })
    }

    /// Opens the configured store.
    ///
    /// # Errors
    /// Returns `Store` when the SQLite database cannot be opened or migrated.
    pub fn open_store(&self) -> Result<Box<dyn MemoStore>, ConfigError> {
        match &self.backend {
            StoreBackend::Sqlite { path } => {
                let store = SqliteMemoStore::open(path)?;
                info!(
                    "event=store_open module=config status=ok backend=sqlite path={}",
                    path.display()
                );
                Ok(Box::new(store))
            }
            StoreBackend::Rest {
                base_url,
                api_key,
                table,
            } => {
                let store = RestMemoStore::new(base_url, api_key.clone(), table);
                info!(
                    "event=store_open module=config status=ok backend=rest endpoint={}",
                    store.endpoint()
                );
                Ok(Box::new(store))
            }
        }
    }
}
