//! Memo domain model.
//!
//! # Responsibility
//! - Define the application-facing memo shape consumed by UI callers.
//! - Validate write-path invariants before anything reaches storage.
//!
//! # Invariants
//! - `id` is stable and never reused for another memo.
//! - `updated_at >= created_at`; both are equal until the first edit.
//! - Write paths only accept enumerated category codes.

use crate::model::category::Category;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one memo.
pub type MemoId = Uuid;

/// Application-facing memo record.
///
/// Serialized with camelCase keys (`createdAt`, `updatedAt`). The storage row
/// shape lives in `repo::row` and never leaves the data access layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memo {
    pub id: MemoId,
    pub title: String,
    /// Markdown body.
    pub content: String,
    /// Raw category code as stored. See [`Category`].
    pub category: String,
    /// Display order is preserved; duplicates are kept.
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validation errors for memo write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoValidationError {
    /// The nil uuid is reserved as the bulk-delete sentinel.
    ReservedId,
    EmptyTitle,
    UnknownCategory(String),
}

impl Display for MemoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReservedId => write!(f, "memo id cannot be the nil uuid"),
            Self::EmptyTitle => write!(f, "memo title cannot be empty"),
            Self::UnknownCategory(code) => write!(f, "unknown memo category `{code}`"),
        }
    }
}

impl Error for MemoValidationError {}

impl Memo {
    /// Creates a memo with a generated id and both timestamps set to now.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        category: Category,
        tags: Vec<String>,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), title, content, category, tags)
    }

    /// Creates a memo with a caller-provided id.
    ///
    /// Timestamps are provisional; storage assigns the persisted values.
    pub fn with_id(
        id: MemoId,
        title: impl Into<String>,
        content: impl Into<String>,
        category: Category,
        tags: Vec<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: title.into(),
            content: content.into(),
            category: category.code().to_string(),
            tags,
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks write-path invariants.
    ///
    /// # Errors
    /// - `ReservedId` when `id` is the nil uuid.
    /// - `EmptyTitle` when the title is blank after trimming.
    /// - `UnknownCategory` when `category` is outside the enumeration.
    pub fn validate(&self) -> Result<(), MemoValidationError> {
        if self.id.is_nil() {
            return Err(MemoValidationError::ReservedId);
        }
        if self.title.trim().is_empty() {
            return Err(MemoValidationError::EmptyTitle);
        }
        if Category::parse(&self.category).is_none() {
            return Err(MemoValidationError::UnknownCategory(self.category.clone()));
        }
        Ok(())
    }

    /// Parsed category, `Other` for unrecognized codes.
    pub fn category_kind(&self) -> Category {
        Category::from_code_lossy(&self.category)
    }

    /// Whether the memo has been modified since creation.
    pub fn is_edited(&self) -> bool {
        self.updated_at != self.created_at
    }
}
