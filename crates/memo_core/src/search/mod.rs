//! Memo search helpers.
//!
//! # Responsibility
//! - Keep client-side match rules (text re-validation, tag matching) in core.

pub mod matcher;
