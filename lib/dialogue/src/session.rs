//! Chat session management.
//!
//! A session pairs one visitor's [`ConversationState`] with the transcript
//! of the exchange. Sessions live only in memory and expire after a period
//! of inactivity.

use crate::engine::{DialogueEngine, Turn};
use crate::error::SessionError;
use crate::message::TranscriptEntry;
use crate::state::ConversationState;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use crisis_hub_core::{ChatSessionId, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// A single visitor's conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    /// Unique session identifier.
    pub id: ChatSessionId,
    /// Dialogue state.
    pub state: ConversationState,
    /// Append-only transcript.
    pub transcript: Vec<TranscriptEntry>,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// When the session last processed input.
    pub last_active_at: DateTime<Utc>,
}

impl ChatSession {
    /// Starts a session whose transcript opens with the engine's greeting.
    #[must_use]
    pub fn start(engine: &DialogueEngine) -> Self {
        let now = Utc::now();
        Self {
            id: ChatSessionId::new(),
            state: ConversationState::new(),
            transcript: vec![TranscriptEntry::bot(&engine.greeting())],
            created_at: now,
            last_active_at: now,
        }
    }

    /// Runs one turn and records it in the transcript.
    ///
    /// Blank input is not recorded and does not count as activity.
    pub fn handle_input(&mut self, engine: &DialogueEngine, input: &str) -> Turn {
        let turn = engine.respond(self.state, input);
        if turn.messages.is_empty() {
            return turn;
        }

        self.transcript.push(TranscriptEntry::user(input.trim()));
        self.transcript
            .extend(turn.messages.iter().map(TranscriptEntry::bot));
        self.state = turn.state;
        self.last_active_at = Utc::now();
        turn
    }

    /// Returns true if the session has been idle for at least `ttl`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.last_active_at >= ttl
    }
}

/// Trait for chat session storage.
///
/// Turns are applied inside the store so that two inputs for the same
/// session are never processed concurrently.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Stores a new session.
    async fn insert(&self, session: ChatSession) -> Result<(), SessionError>;

    /// Returns a snapshot of a live session.
    async fn get(&self, id: ChatSessionId) -> Result<ChatSession, SessionError>;

    /// Applies one line of input to a live session.
    async fn process_input(
        &self,
        id: ChatSessionId,
        engine: &DialogueEngine,
        input: &str,
    ) -> Result<Turn, SessionError>;

    /// Removes every session idle since before `now - ttl`, returning how many.
    async fn remove_expired(&self, now: DateTime<Utc>) -> Result<usize, SessionError>;
}

/// Session store backed by a process-local map.
#[derive(Debug)]
pub struct InMemorySessionStore {
    ttl: Duration,
    sessions: RwLock<HashMap<ChatSessionId, ChatSession>>,
}

impl InMemorySessionStore {
    /// Creates an empty store whose sessions expire after `ttl` of inactivity.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored sessions, expired or not.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Returns true if no sessions are stored.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    fn live<'a>(
        sessions: &'a mut HashMap<ChatSessionId, ChatSession>,
        id: ChatSessionId,
        ttl: Duration,
    ) -> std::result::Result<&'a mut ChatSession, SessionError> {
        let expired = sessions
            .get(&id)
            .ok_or(SessionError::NotFound { id })?
            .is_expired(Utc::now(), ttl);
        if expired {
            sessions.remove(&id);
            return Err(SessionError::Expired { id });
        }
        sessions.get_mut(&id).ok_or(SessionError::NotFound { id })
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, session: ChatSession) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().await;
        let id = session.id;
        if sessions.contains_key(&id) {
            return Err(SessionError::AlreadyExists { id }.into());
        }
        sessions.insert(id, session);
        tracing::debug!(session_id = %id, "chat session started");
        Ok(())
    }

    async fn get(&self, id: ChatSessionId) -> Result<ChatSession, SessionError> {
        let mut sessions = self.sessions.write().await;
        let session = Self::live(&mut sessions, id, self.ttl)?;
        Ok(session.clone())
    }

    async fn process_input(
        &self,
        id: ChatSessionId,
        engine: &DialogueEngine,
        input: &str,
    ) -> Result<Turn, SessionError> {
        let mut sessions = self.sessions.write().await;
        let session = Self::live(&mut sessions, id, self.ttl)?;
        Ok(session.handle_input(engine, input))
    }

    async fn remove_expired(&self, now: DateTime<Utc>) -> Result<usize, SessionError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now, self.ttl));
        Ok(before - sessions.len())
    }
}
