//! Shared application state.

use crate::config::{SessionConfig, SiteConfig};
use crisis_hub_dialogue::{DialogueEngine, SessionStore};
use crisis_hub_resources::ResourceLookup;
use std::sync::Arc;

/// State shared by every handler.
pub struct AppState {
    /// The helpline chatbot. Immutable, shared by all sessions.
    pub engine: DialogueEngine,
    /// Live chat sessions.
    pub sessions: Arc<dyn SessionStore>,
    /// Nearby resource search.
    pub lookup: ResourceLookup,
    /// Session cookie settings.
    pub session_config: SessionConfig,
    /// Metadata handed to the page.
    pub site: SiteConfig,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        engine: DialogueEngine,
        sessions: Arc<dyn SessionStore>,
        lookup: ResourceLookup,
        session_config: SessionConfig,
        site: SiteConfig,
    ) -> Self {
        Self {
            engine,
            sessions,
            lookup,
            session_config,
            site,
        }
    }
}
