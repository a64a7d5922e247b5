//! Chat API: start a session, send a message, read the transcript.
//!
//! The session id travels in an http-only cookie. A message sent without
//! a live session silently starts a new one, so an expired cookie never
//! strands the visitor.

use crate::error::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use crisis_hub_core::ChatSessionId;
use crisis_hub_dialogue::{BotMessage, ChatSession, ConversationState, Turn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::Duration as TimeDuration;

/// Chat session cookie name.
pub const CHAT_COOKIE: &str = "chat_session";

/// Longest accepted message, in characters.
const MAX_INPUT_CHARS: usize = 1000;

/// Response for a newly started session.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: ChatSessionId,
    pub messages: Vec<BotMessage>,
    pub state: ConversationState,
}

/// A line of user input.
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub text: String,
}

/// Response for one processed message.
#[derive(Debug, Serialize)]
pub struct TurnResponse {
    pub session_id: ChatSessionId,
    /// True if the message started a fresh session.
    pub new_session: bool,
    #[serde(flatten)]
    pub turn: Turn,
}

fn session_cookie(state: &AppState, id: ChatSessionId) -> Cookie<'static> {
    Cookie::build((CHAT_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .secure(state.session_config.secure_cookies)
        .same_site(SameSite::Lax)
        .max_age(TimeDuration::minutes(state.session_config.ttl_minutes))
        .build()
}

fn session_id_from(jar: &CookieJar) -> Option<ChatSessionId> {
    jar.get(CHAT_COOKIE)
        .and_then(|cookie| cookie.value().parse().ok())
}

async fn open_session(state: &AppState) -> Result<ChatSession, ApiError> {
    let session = ChatSession::start(&state.engine);
    state.sessions.insert(session.clone()).await.map_err(|e| {
        ApiError::Internal {
            details: format!("failed to store new chat session: {e}"),
        }
    })?;
    Ok(session)
}

/// Starts a new chat session and returns the greeting.
pub async fn start_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<SessionResponse>), ApiError> {
    let session = open_session(&state).await?;
    let response = SessionResponse {
        session_id: session.id,
        messages: vec![state.engine.greeting()],
        state: session.state,
    };
    Ok((jar.add(session_cookie(&state, session.id)), Json(response)))
}

/// Processes one message for the cookie's session.
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(request): Json<MessageRequest>,
) -> Result<(CookieJar, Json<TurnResponse>), ApiError> {
    if request.text.chars().count() > MAX_INPUT_CHARS {
        return Err(ApiError::InvalidInput {
            reason: format!("Message is longer than {MAX_INPUT_CHARS} characters"),
        });
    }

    if let Some(id) = session_id_from(&jar) {
        match state
            .sessions
            .process_input(id, &state.engine, &request.text)
            .await
        {
            Ok(turn) => {
                let response = TurnResponse {
                    session_id: id,
                    new_session: false,
                    turn,
                };
                // Refresh the cookie so its lifetime tracks session activity.
                return Ok((jar.add(session_cookie(&state, id)), Json(response)));
            }
            Err(e) => {
                tracing::debug!(error = %e, session_id = %id, "starting a new chat session");
            }
        }
    }

    let session = open_session(&state).await?;
    let mut turn = state
        .sessions
        .process_input(session.id, &state.engine, &request.text)
        .await
        .map_err(|e| ApiError::Internal {
            details: format!("new chat session {} vanished: {e}", session.id),
        })?;
    // The fresh transcript opens with the greeting; the client has not seen it yet.
    turn.messages.insert(0, state.engine.greeting());

    let response = TurnResponse {
        session_id: session.id,
        new_session: true,
        turn,
    };
    Ok((jar.add(session_cookie(&state, session.id)), Json(response)))
}

/// Returns the full transcript of the cookie's session.
pub async fn transcript(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<Json<ChatSession>, ApiError> {
    let id = session_id_from(&jar).ok_or(ApiError::SessionNotFound)?;
    let session = state.sessions.get(id).await.map_err(|e| {
        tracing::debug!(error = %e, session_id = %id, "transcript requested for unknown session");
        ApiError::SessionNotFound
    })?;
    Ok(Json(session))
}
