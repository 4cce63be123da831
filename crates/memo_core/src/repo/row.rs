//! Storage row shapes and the two pure mappings between rows and memos.
//!
//! # Responsibility
//! - Define the snake_case row shape shared by every store backend.
//! - Convert rows into application memos and memos into write patches.
//!
//! # Invariants
//! - Every read path goes through [`row_to_memo`]; every write path goes
//!   through [`memo_to_patch`].
//! - `MemoRow` never crosses the data access boundary.

use crate::model::memo::{Memo, MemoId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted memo row as the store returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoRow {
    pub id: MemoId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub category: String,
    /// Nullable list column on the remote backend.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller-writable columns. Timestamps are always assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoPatch {
    pub title: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
}

/// Insert body: the patch plus the caller-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoInsert<'a> {
    pub id: MemoId,
    #[serde(flatten)]
    pub patch: &'a MemoPatch,
}

/// Converts one storage row into the application memo shape.
pub fn row_to_memo(row: MemoRow) -> Memo {
    Memo {
        id: row.id,
        title: row.title,
        content: row.content,
        category: row.category,
        tags: row.tags.unwrap_or_default(),
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

/// Extracts the writable columns of a memo.
pub fn memo_to_patch(memo: &Memo) -> MemoPatch {
    MemoPatch {
        title: memo.title.clone(),
        content: memo.content.clone(),
        category: memo.category.clone(),
        tags: memo.tags.clone(),
    }
}
