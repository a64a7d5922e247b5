//! Error types for the dialogue crate.
//!
//! The dialogue engine itself never fails; only session bookkeeping does.
//! Errors are wrapped in a rootcause `Report` when they leave the store.

use crisis_hub_core::ChatSessionId;
use std::fmt;

/// Errors from session store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Session not found.
    NotFound { id: ChatSessionId },
    /// Session was idle for longer than the store's time-to-live.
    Expired { id: ChatSessionId },
    /// A session with this id is already stored.
    AlreadyExists { id: ChatSessionId },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { id } => write!(f, "chat session not found: {id}"),
            Self::Expired { id } => write!(f, "chat session expired: {id}"),
            Self::AlreadyExists { id } => write!(f, "chat session already exists: {id}"),
        }
    }
}

impl std::error::Error for SessionError {}
