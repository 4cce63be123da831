//! Core use-case services.
//!
//! # Responsibility
//! - Expose the memo data access boundary to UI callers.
//! - Keep UI layers decoupled from storage details.

pub mod memo_service;
