//! Core logic for the memo application.
//! Owns the data access boundary, storage backends and the memo viewer.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod render;
pub mod repo;
pub mod search;
pub mod service;
pub mod viewer;

pub use config::{ConfigError, MemoConfig, StoreBackend};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::category::{Category, CategoryBadge, CATEGORY_FILTER_ALL};
pub use model::memo::{Memo, MemoId, MemoValidationError};
pub use render::{derive_preview, markdown_to_html};
pub use repo::memo_store::{MemoStore, StoreError, StoreResult};
pub use repo::rest_store::RestMemoStore;
pub use repo::row::{memo_to_patch, row_to_memo, MemoPatch, MemoRow};
pub use repo::sqlite_store::SqliteMemoStore;
pub use service::memo_service::{MemoService, CLEAR_ALL_SENTINEL};
pub use viewer::host::{HostLease, ViewerHost};
pub use viewer::view::{format_long_datetime, ViewerOptions, ViewerView};
pub use viewer::{ClickTarget, Key, MemoViewer, ViewerCallbacks, ViewerEvent};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
