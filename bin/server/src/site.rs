//! Page metadata: initial map view and share text.

use crate::config::SiteConfig;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use std::sync::Arc;

/// Returns the configured site metadata.
pub async fn metadata(State(state): State<Arc<AppState>>) -> Json<SiteConfig> {
    Json(state.site.clone())
}
