//! Memo store contract and error taxonomy.
//!
//! # Responsibility
//! - Define the query operations every memo backend must provide.
//! - Classify backend failures (database, transport, HTTP status, decoding).
//!
//! # Invariants
//! - List queries are ordered by `created_at DESC`.
//! - Stores assign `created_at`/`updated_at`; callers never write them.
//! - `update_by_id` strictly advances `updated_at`.

use crate::db::DbError;
use crate::model::memo::MemoId;
use crate::repo::row::{MemoPatch, MemoRow};
use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Backend failure for memo store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Embedded database or migration failure.
    Db(DbError),
    /// Transport failure talking to the remote backend.
    Http(reqwest::Error),
    /// Remote backend answered with a non-success status.
    Status { status: u16, body: String },
    /// Response or column payload could not be decoded.
    Decode(String),
    /// A memo with this id already exists.
    Conflict(MemoId),
    /// Persisted row violates the memo shape.
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Http(err) => write!(f, "transport error: {err}"),
            Self::Status { status, body } => {
                write!(f, "store responded with status {status}: {body}")
            }
            Self::Decode(message) => write!(f, "failed to decode store payload: {message}"),
            Self::Conflict(id) => write!(f, "memo already exists: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted memo data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Http(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            return Self::Decode(value.to_string());
        }
        Self::Http(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value.to_string())
    }
}

/// Query operations required of a memo backend.
#[async_trait]
pub trait MemoStore: Send + Sync {
    /// Short backend name used in log events.
    fn backend(&self) -> &'static str;

    /// All rows, newest-created first.
    async fn select_all(&self) -> StoreResult<Vec<MemoRow>>;

    async fn select_by_id(&self, id: MemoId) -> StoreResult<Option<MemoRow>>;

    /// Rows whose category equals `category` exactly, newest first.
    async fn select_by_category(&self, category: &str) -> StoreResult<Vec<MemoRow>>;

    /// Case-insensitive `%query%` match on title OR content, newest first.
    async fn search_text(&self, query: &str) -> StoreResult<Vec<MemoRow>>;

    /// Inserts a row and returns it with store-assigned timestamps.
    async fn insert(&self, id: MemoId, patch: &MemoPatch) -> StoreResult<MemoRow>;

    /// Overwrites writable columns. Returns `None` when `id` is absent.
    async fn update_by_id(&self, id: MemoId, patch: &MemoPatch) -> StoreResult<Option<MemoRow>>;

    /// Deletes one row. Returns the number of rows affected.
    async fn delete_by_id(&self, id: MemoId) -> StoreResult<u64>;

    /// Deletes every row whose id differs from `sentinel`.
    async fn delete_all_except(&self, sentinel: MemoId) -> StoreResult<u64>;
}

#[async_trait]
impl<T: MemoStore + ?Sized> MemoStore for Box<T> {
    fn backend(&self) -> &'static str {
        (**self).backend()
    }

    async fn select_all(&self) -> StoreResult<Vec<MemoRow>> {
        (**self).select_all().await
    }

    async fn select_by_id(&self, id: MemoId) -> StoreResult<Option<MemoRow>> {
        (**self).select_by_id(id).await
    }

    async fn select_by_category(&self, category: &str) -> StoreResult<Vec<MemoRow>> {
        (**self).select_by_category(category).await
    }

    async fn search_text(&self, query: &str) -> StoreResult<Vec<MemoRow>> {
        (**self).search_text(query).await
    }

    async fn insert(&self, id: MemoId, patch: &MemoPatch) -> StoreResult<MemoRow> {
        (**self).insert(id, patch).await
    }

    async fn update_by_id(&self, id: MemoId, patch: &MemoPatch) -> StoreResult<Option<MemoRow>> {
        (**self).update_by_id(id, patch).await
    }

    async fn delete_by_id(&self, id: MemoId) -> StoreResult<u64> {
        (**self).delete_by_id(id).await
    }

    async fn delete_all_except(&self, sentinel: MemoId) -> StoreResult<u64> {
        (**self).delete_all_except(sentinel).await
    }
}
