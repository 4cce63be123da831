//! Memo data access service.
//!
//! # Responsibility
//! - Be the only caller of `MemoStore` on behalf of UI code.
//! - Convert every stored row into the application memo shape.
//! - Turn backend failures into empty/`None`/`false` results and log them.
//!
//! # Invariants
//! - No error value escapes this boundary.
//! - "Not found" and "backend failure" are indistinguishable to callers.
//! - `remove`/`clear_all` report request success, not affected rows.
//! - Lists are ordered newest-created first.

use crate::model::category::CATEGORY_FILTER_ALL;
use crate::model::memo::{Memo, MemoId};
use crate::repo::memo_store::MemoStore;
use crate::repo::row::{memo_to_patch, row_to_memo, MemoRow};
use crate::search::matcher::MemoMatcher;
use log::{debug, error, warn};
use std::collections::HashSet;
use std::fmt::Display;
use uuid::Uuid;

/// Id that `clear_all` spares. No memo is ever created with it.
pub const CLEAR_ALL_SENTINEL: MemoId = Uuid::nil();

/// Data access facade over a memo store.
pub struct MemoService<S: MemoStore> {
    store: S,
}

impl<S: MemoStore> MemoService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Lists every memo, newest first. Empty on failure.
    pub async fn list_all(&self) -> Vec<Memo> {
        match self.store.select_all().await {
            Ok(rows) => self.rows_to_memos("memo_list", rows),
            Err(err) => self.fail("memo_list", &err, Vec::new()),
        }
    }

    /// Persists a new memo whose id was assigned by the caller.
    ///
    /// Returns the stored representation with store-assigned timestamps, or
    /// `None` on validation failure, duplicate id or backend failure.
    pub async fn create(&self, memo: &Memo) -> Option<Memo> {
        if let Err(err) = memo.validate() {
            return self.reject("memo_create", memo.id, &err);
        }

        match self.store.insert(memo.id, &memo_to_patch(memo)).await {
            Ok(row) => {
                debug!(
                    "event=memo_create module=service status=ok backend={} memo_id={}",
                    self.store.backend(),
                    row.id
                );
                Some(row_to_memo(row))
            }
            Err(err) => self.fail("memo_create", &err, None),
        }
    }

    /// Overwrites title, content, category and tags of an existing memo.
    ///
    /// `id` and `created_at` are preserved; the store advances `updated_at`.
    pub async fn update(&self, memo: &Memo) -> Option<Memo> {
        if let Err(err) = memo.validate() {
            return self.reject("memo_update", memo.id, &err);
        }

        match self.store.update_by_id(memo.id, &memo_to_patch(memo)).await {
            Ok(Some(row)) => {
                debug!(
                    "event=memo_update module=service status=ok backend={} memo_id={}",
                    self.store.backend(),
                    row.id
                );
                Some(row_to_memo(row))
            }
            Ok(None) => {
                warn!(
                    "event=memo_update module=service status=not_found backend={} memo_id={}",
                    self.store.backend(),
                    memo.id
                );
                None
            }
            Err(err) => self.fail("memo_update", &err, None),
        }
    }

    /// Deletes one memo. `true` when the request completed without error,
    /// including when no row matched.
    pub async fn remove(&self, id: MemoId) -> bool {
        match self.store.delete_by_id(id).await {
            Ok(affected) => {
                debug!(
                    "event=memo_remove module=service status=ok backend={} memo_id={} affected={}",
                    self.store.backend(),
                    id,
                    affected
                );
                true
            }
            Err(err) => self.fail("memo_remove", &err, false),
        }
    }

    /// Case-insensitive search over title, content and tags, newest first.
    ///
    /// Title/content matching is delegated to the store and re-validated
    /// here; tag matching happens only here. Both result sets are unioned.
    pub async fn search(&self, query: &str) -> Vec<Memo> {
        let matcher = match MemoMatcher::new(query) {
            Ok(matcher) => matcher,
            Err(err) => return self.fail("memo_search", &err, Vec::new()),
        };

        let text_rows = match self.store.search_text(&query.to_lowercase()).await {
            Ok(rows) => rows,
            Err(err) => return self.fail("memo_search", &err, Vec::new()),
        };
        let all_rows = match self.store.select_all().await {
            Ok(rows) => rows,
            Err(err) => return self.fail("memo_search", &err, Vec::new()),
        };

        let mut seen = HashSet::new();
        let text_hits = text_rows
            .into_iter()
            .map(row_to_memo)
            .filter(|memo| matcher.matches_text(memo));
        let tag_hits = all_rows
            .into_iter()
            .map(row_to_memo)
            .filter(|memo| matcher.matches_tags(memo));
        let mut hits = text_hits
            .chain(tag_hits)
            .filter(|memo| seen.insert(memo.id))
            .collect::<Vec<_>>();
        hits.sort_by(|left, right| right.created_at.cmp(&left.created_at));

        debug!(
            "event=memo_search module=service status=ok backend={} hits={}",
            self.store.backend(),
            hits.len()
        );
        hits
    }

    /// Lists memos of one category, newest first. `"all"` disables the filter.
    pub async fn list_by_category(&self, category: &str) -> Vec<Memo> {
        if category == CATEGORY_FILTER_ALL {
            return self.list_all().await;
        }

        match self.store.select_by_category(category).await {
            Ok(rows) => self.rows_to_memos("memo_list_by_category", rows),
            Err(err) => self.fail("memo_list_by_category", &err, Vec::new()),
        }
    }

    /// Gets one memo, `None` when absent or on failure.
    pub async fn get_by_id(&self, id: MemoId) -> Option<Memo> {
        match self.store.select_by_id(id).await {
            Ok(row) => row.map(row_to_memo),
            Err(err) => self.fail("memo_get", &err, None),
        }
    }

    /// Deletes every memo. `true` when the request completed without error.
    pub async fn clear_all(&self) -> bool {
        match self.store.delete_all_except(CLEAR_ALL_SENTINEL).await {
            Ok(affected) => {
                debug!(
                    "event=memo_clear module=service status=ok backend={} affected={}",
                    self.store.backend(),
                    affected
                );
                true
            }
            Err(err) => self.fail("memo_clear", &err, false),
        }
    }

    fn rows_to_memos(&self, event: &str, rows: Vec<MemoRow>) -> Vec<Memo> {
        debug!(
            "event={event} module=service status=ok backend={} count={}",
            self.store.backend(),
            rows.len()
        );
        rows.into_iter().map(row_to_memo).collect()
    }

    fn reject(&self, event: &str, id: MemoId, err: &dyn Display) -> Option<Memo> {
        warn!(
            "event={event} module=service status=rejected backend={} memo_id={} error={}",
            self.store.backend(),
            id,
            err
        );
        None
    }

    fn fail<T>(&self, event: &str, err: &dyn Display, fallback: T) -> T {
        error!(
            "event={event} module=service status=error backend={} error={}",
            self.store.backend(),
            err
        );
        fallback
    }
}
