//! Memo store contracts and backend implementations.
//!
//! # Responsibility
//! - Define the query contract every memo backend provides.
//! - Isolate SQL and REST details from the data access service.
//!
//! # Invariants
//! - Stores deal in `MemoRow`; only the service converts rows to memos.
//! - Stores return typed errors; the service decides how failures surface.

pub mod memo_store;
pub mod rest_store;
pub mod row;
pub mod sqlite_store;
