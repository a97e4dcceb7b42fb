//! Domain model for notes, tags and categories.
//!
//! # Responsibility
//! - Define the canonical records held by the notes store.
//! - Define the explicit patch values used for partial updates.
//!
//! # Invariants
//! - Every record is identified by a stable `EntityId`.
//! - Notes reference tags and categories by name, never by id.

pub mod category;
pub mod ids;
pub mod note;
pub mod tag;
