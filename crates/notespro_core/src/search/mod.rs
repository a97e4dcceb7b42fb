//! Note query entry points.
//!
//! # Responsibility
//! - Filter and sort the in-memory note collection for list views.
//! - Aggregate per-difficulty counts.
//!
//! Matching is plain case-insensitive substring search; there is no index.

pub mod filter;
