//! HTTP routing.

use crate::state::AppState;
use crate::{chat, resources, site, theme};
use axum::Router;
use axum::routing::{get, post};
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Builds the application router.
///
/// API routes live under `/api`; everything else is served from `site_dir`.
pub fn router(state: Arc<AppState>, site_dir: &Path) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/chat/session", post(chat::start_session))
        .route("/api/chat/message", post(chat::send_message))
        .route("/api/chat/transcript", get(chat::transcript))
        .route("/api/resources", get(resources::search))
        .route("/api/theme", get(theme::current))
        .route("/api/theme/toggle", post(theme::toggle))
        .route("/api/site", get(site::metadata))
        .fallback_service(ServeDir::new(site_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
