//! Core domain types and utilities for the crisis-hub service.
//!
//! This crate provides the foundational types, error handling, and shared
//! vocabulary (crisis categories, languages) used by the dialogue engine,
//! the resource lookup and the web server.

pub mod category;
pub mod error;
pub mod id;
pub mod language;

pub use category::CrisisCategory;
pub use error::Result;
pub use id::{ChatSessionId, LookupId, MessageId, ParseIdError};
pub use language::Language;
