//! Memo domain model.
//!
//! # Responsibility
//! - Define the application-facing memo shape and its category enumeration.
//!
//! # Invariants
//! - Every memo is identified by a stable `MemoId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod category;
pub mod memo;
