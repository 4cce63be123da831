//! Remote memo store speaking the PostgREST dialect of a hosted database.
//!
//! # Responsibility
//! - Translate `MemoStore` queries into REST requests on one table.
//! - Map HTTP status and payload failures into `StoreError`.
//!
//! # Invariants
//! - Every request carries the `apikey` and bearer authorization headers.
//! - Write requests ask for `return=representation` so rows are echoed back.
//! - No retries and no timeout beyond the HTTP client defaults.

use crate::model::memo::MemoId;
use crate::repo::memo_store::{MemoStore, StoreError, StoreResult};
use crate::repo::row::{MemoInsert, MemoPatch, MemoRow};
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};

const REST_PATH: &str = "rest/v1";
const ORDER_NEWEST_FIRST: &str = "created_at.desc";
const PREFER_REPRESENTATION: &str = "return=representation";

/// REST-backed memo store.
#[derive(Debug, Clone)]
pub struct RestMemoStore {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl RestMemoStore {
    /// Creates a store for `{base_url}/rest/v1/{table}`.
    pub fn new(base_url: &str, api_key: impl Into<String>, table: &str) -> Self {
        Self::with_client(Client::new(), base_url, api_key, table)
    }

    pub fn with_client(
        client: Client,
        base_url: &str,
        api_key: impl Into<String>,
        table: &str,
    ) -> Self {
        Self {
            client,
            endpoint: table_endpoint(base_url, table),
            api_key: api_key.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.client
            .request(method, &self.endpoint)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    fn select(&self) -> RequestBuilder {
        self.request(Method::GET).query(&[("select", "*")])
    }

    async fn fetch_rows(&self, builder: RequestBuilder) -> StoreResult<Vec<MemoRow>> {
        let response = check_status(builder.send().await?, None).await?;
        let rows = response.json::<Vec<MemoRow>>().await?;
        debug!(
            "event=rest_rows module=repo status=ok backend=rest count={}",
            rows.len()
        );
        Ok(rows)
    }
}

#[async_trait]
impl MemoStore for RestMemoStore {
    fn backend(&self) -> &'static str {
        "rest"
    }

    async fn select_all(&self) -> StoreResult<Vec<MemoRow>> {
        self.fetch_rows(self.select().query(&[("order", ORDER_NEWEST_FIRST)]))
            .await
    }

    async fn select_by_id(&self, id: MemoId) -> StoreResult<Option<MemoRow>> {
        let mut rows = self
            .fetch_rows(self.select().query(&[("id", eq_filter(&id.to_string()))]))
            .await?;
        Ok(rows.pop())
    }

    async fn select_by_category(&self, category: &str) -> StoreResult<Vec<MemoRow>> {
        self.fetch_rows(self.select().query(&[
            ("category", eq_filter(category)),
            ("order", ORDER_NEWEST_FIRST.to_string()),
        ]))
        .await
    }

    async fn search_text(&self, query: &str) -> StoreResult<Vec<MemoRow>> {
        self.fetch_rows(self.select().query(&[
            ("or", ilike_any_filter(&["title", "content"], query)),
            ("order", ORDER_NEWEST_FIRST.to_string()),
        ]))
        .await
    }

    async fn insert(&self, id: MemoId, patch: &MemoPatch) -> StoreResult<MemoRow> {
        let body = MemoInsert { id, patch };
        let response = self
            .request(Method::POST)
            .header("Prefer", PREFER_REPRESENTATION)
            .json(&body)
            .send()
            .await?;
        let response = check_status(response, Some(id)).await?;
        let mut rows = response.json::<Vec<MemoRow>>().await?;
        rows.pop()
            .ok_or_else(|| StoreError::InvalidData(format!("insert of {id} returned no row")))
    }

    async fn update_by_id(&self, id: MemoId, patch: &MemoPatch) -> StoreResult<Option<MemoRow>> {
        let response = self
            .request(Method::PATCH)
            .query(&[("id", eq_filter(&id.to_string()))])
            .header("Prefer", PREFER_REPRESENTATION)
            .json(patch)
            .send()
            .await?;
        let response = check_status(response, None).await?;
        let mut rows = response.json::<Vec<MemoRow>>().await?;
        Ok(rows.pop())
    }

    async fn delete_by_id(&self, id: MemoId) -> StoreResult<u64> {
        self.delete_where("id", eq_filter(&id.to_string())).await
    }

    async fn delete_all_except(&self, sentinel: MemoId) -> StoreResult<u64> {
        self.delete_where("id", format!("neq.{sentinel}")).await
    }
}

impl RestMemoStore {
    async fn delete_where(&self, column: &str, filter: String) -> StoreResult<u64> {
        let response = self
            .request(Method::DELETE)
            .query(&[(column, filter)])
            .header("Prefer", PREFER_REPRESENTATION)
            .send()
            .await?;
        let response = check_status(response, None).await?;
        let rows = response.json::<Vec<MemoRow>>().await?;
        Ok(rows.len() as u64)
    }
}

async fn check_status(response: Response, inserted: Option<MemoId>) -> StoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::CONFLICT {
        if let Some(id) = inserted {
            return Err(StoreError::Conflict(id));
        }
    }

    let body = response.text().await.unwrap_or_default();
    Err(StoreError::Status {
        status: status.as_u16(),
        body,
    })
}

/// Builds `{base_url}/rest/v1/{table}` tolerating a trailing slash.
pub fn table_endpoint(base_url: &str, table: &str) -> String {
    format!("{}/{REST_PATH}/{}", base_url.trim_end_matches('/'), table)
}

/// PostgREST equality filter value.
pub fn eq_filter(value: &str) -> String {
    format!("eq.{}", quote_filter_value(value))
}

/// PostgREST `or=(...)` value matching `*query*` case-insensitively on any
/// of `columns`.
pub fn ilike_any_filter(columns: &[&str], query: &str) -> String {
    let pattern = quote_filter_value(&format!("*{query}*"));
    let clauses = columns
        .iter()
        .map(|column| format!("{column}.ilike.{pattern}"))
        .collect::<Vec<_>>();
    format!("({})", clauses.join(","))
}

/// Double-quotes a filter value when it contains PostgREST reserved
/// characters, escaping `"` and `\`.
pub fn quote_filter_value(value: &str) -> String {
    let reserved = value
        .chars()
        .any(|ch| matches!(ch, ',' | '.' | ':' | '(' | ')' | '"' | '\\' | ' ' | '*'));
    if !reserved {
        return value.to_string();
    }
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

#[cfg(test)]
mod tests {
    use super::{eq_filter, ilike_any_filter, quote_filter_value, table_endpoint};

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        assert_eq!(
            table_endpoint("https://db.example.co/", "memos"),
            "https://db.example.co/rest/v1/memos"
        );
    }

    #[test]
    fn plain_values_are_not_quoted() {
        assert_eq!(eq_filter("personal"), "eq.personal");
        assert_eq!(
            eq_filter("6a1f8e9c-2f54-4d0b-9a53-0d7f1c2b3a4e"),
            "eq.6a1f8e9c-2f54-4d0b-9a53-0d7f1c2b3a4e"
        );
    }

    #[test]
    fn ilike_filter_quotes_reserved_characters() {
        assert_eq!(
            ilike_any_filter(&["title", "content"], "milk"),
            "(title.ilike.\"*milk*\",content.ilike.\"*milk*\")"
        );
        assert_eq!(
            quote_filter_value("say \"hi\", ok"),
            "\"say \\\"hi\\\", ok\""
        );
    }
}
