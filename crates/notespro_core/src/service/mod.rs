//! Core use-case services.
//!
//! # Responsibility
//! - Wrap the notes store with the validation rules callers must apply.
//! - Keep front ends decoupled from store and storage details.

pub mod notebook_service;
