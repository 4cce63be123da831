//! Embedded SQLite implementation of the memo store contract.
//!
//! # Responsibility
//! - Serve every `MemoStore` query from a local migrated connection.
//! - Assign timestamps the way the remote backend does on write.
//!
//! # Invariants
//! - `updated_at` is set to `max(now, previous + 1ms)` on update.
//! - Tags are persisted as a JSON array in insertion order.
//! - Text search is a literal substring test under Unicode lowercase folding.
//! - The connection lock is never held across an await point.

use crate::db::{open_db, open_db_in_memory, FOLD_FUNCTION};
use crate::model::memo::MemoId;
use crate::repo::memo_store::{MemoStore, StoreError, StoreResult};
use crate::repo::row::{MemoPatch, MemoRow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::{ffi, params, Connection, ErrorCode, OptionalExtension, Row};
use std::path::Path;
use uuid::Uuid;

const MEMO_COLUMNS: &str = "id, title, content, category, tags, created_at, updated_at";
const ORDER_NEWEST_FIRST: &str = "ORDER BY created_at DESC, rowid DESC";

/// SQLite-backed memo store.
pub struct SqliteMemoStore {
    conn: Mutex<Connection>,
}

impl SqliteMemoStore {
    /// Wraps a connection obtained from `open_db`/`open_db_in_memory`.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Opens (and migrates) a database file.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self::new(open_db(path)?))
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> StoreResult<T>) -> StoreResult<T> {
        let conn = self.conn.lock();
        f(&conn)
    }

    fn query_rows(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> StoreResult<Vec<MemoRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(sql)?;
            let mut rows = stmt.query(params)?;
            let mut memos = Vec::new();
            while let Some(row) = rows.next()? {
                memos.push(parse_memo_row(row)?);
            }
            Ok(memos)
        })
    }
}

#[async_trait]
impl MemoStore for SqliteMemoStore {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    async fn select_all(&self) -> StoreResult<Vec<MemoRow>> {
        self.query_rows(
            &format!("SELECT {MEMO_COLUMNS} FROM memos {ORDER_NEWEST_FIRST};"),
            params![],
        )
    }

    async fn select_by_id(&self, id: MemoId) -> StoreResult<Option<MemoRow>> {
        let mut rows = self.query_rows(
            &format!("SELECT {MEMO_COLUMNS} FROM memos WHERE id = ?1;"),
            [id.to_string()],
        )?;
        Ok(rows.pop())
    }

    async fn select_by_category(&self, category: &str) -> StoreResult<Vec<MemoRow>> {
        self.query_rows(
            &format!(
                "SELECT {MEMO_COLUMNS} FROM memos WHERE category = ?1 {ORDER_NEWEST_FIRST};"
            ),
            [category],
        )
    }

    async fn search_text(&self, query: &str) -> StoreResult<Vec<MemoRow>> {
        self.query_rows(
            &format!(
                "SELECT {MEMO_COLUMNS} FROM memos
                 WHERE instr({FOLD_FUNCTION}(title), {FOLD_FUNCTION}(?1)) > 0
                    OR instr({FOLD_FUNCTION}(content), {FOLD_FUNCTION}(?1)) > 0
                 {ORDER_NEWEST_FIRST};"
            ),
            [query],
        )
    }

    async fn insert(&self, id: MemoId, patch: &MemoPatch) -> StoreResult<MemoRow> {
        let tags = serde_json::to_string(&patch.tags)?;
        let now = Utc::now().timestamp_millis();
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "INSERT INTO memos (id, title, content, category, tags, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
                 RETURNING {MEMO_COLUMNS};"
            ))?;
            let mut rows = stmt
                .query(params![
                    id.to_string(),
                    patch.title.as_str(),
                    patch.content.as_str(),
                    patch.category.as_str(),
                    tags,
                    now,
                ])
                .map_err(|err| map_insert_error(err, id))?;
            let first = rows.next().map_err(|err| map_insert_error(err, id))?;
            match first {
                Some(row) => parse_memo_row(row),
                None => Err(StoreError::InvalidData(format!(
                    "insert of {id} returned no row"
                ))),
            }
        })
    }

    async fn update_by_id(&self, id: MemoId, patch: &MemoPatch) -> StoreResult<Option<MemoRow>> {
        let tags = serde_json::to_string(&patch.tags)?;
        let now = Utc::now().timestamp_millis();
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "UPDATE memos
                 SET
                    title = ?2,
                    content = ?3,
                    category = ?4,
                    tags = ?5,
                    updated_at = MAX(?6, updated_at + 1)
                 WHERE id = ?1
                 RETURNING {MEMO_COLUMNS};"
            ))?;
            let row = stmt
                .query_row(
                    params![
                        id.to_string(),
                        patch.title.as_str(),
                        patch.content.as_str(),
                        patch.category.as_str(),
                        tags,
                        now,
                    ],
                    |row| Ok(parse_memo_row(row)),
                )
                .optional()?;
            row.transpose()
        })
    }

    async fn delete_by_id(&self, id: MemoId) -> StoreResult<u64> {
        self.with_conn(|conn| {
            let changed = conn.execute("DELETE FROM memos WHERE id = ?1;", [id.to_string()])?;
            Ok(changed as u64)
        })
    }

    async fn delete_all_except(&self, sentinel: MemoId) -> StoreResult<u64> {
        self.with_conn(|conn| {
            let changed =
                conn.execute("DELETE FROM memos WHERE id <> ?1;", [sentinel.to_string()])?;
            Ok(changed as u64)
        })
    }
}

fn parse_memo_row(row: &Row<'_>) -> StoreResult<MemoRow> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text)
        .map_err(|_| StoreError::InvalidData(format!("invalid uuid value `{id_text}` in memos.id")))?;

    let tags_text: String = row.get("tags")?;
    let tags: Vec<String> = serde_json::from_str(&tags_text).map_err(|err| {
        StoreError::InvalidData(format!("invalid tags value in memos.tags for {id}: {err}"))
    })?;

    Ok(MemoRow {
        id,
        title: row.get("title")?,
        content: row.get("content")?,
        category: row.get("category")?,
        tags: Some(tags),
        created_at: parse_epoch_ms(row.get("created_at")?, "created_at")?,
        updated_at: parse_epoch_ms(row.get("updated_at")?, "updated_at")?,
    })
}

fn parse_epoch_ms(value: i64, column: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(value).ok_or_else(|| {
        StoreError::InvalidData(format!("invalid timestamp `{value}` in memos.{column}"))
    })
}

fn map_insert_error(err: rusqlite::Error, id: MemoId) -> StoreError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation
                && failure.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
        {
            StoreError::Conflict(id)
        }
        _ => err.into(),
    }
}
