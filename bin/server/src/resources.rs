//! Resource search API.

use crate::error::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::extract::{Query, State};
use crisis_hub_resources::{LookupError, LookupOutcome, Place, ResourceCard};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shown when the search succeeds but nothing is nearby.
pub const NO_RESOURCES: &str = "No resources found nearby.";

/// Query string for a search.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub location: String,
}

/// A successful search.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// The geocoded location, shown as "Your Location".
    pub origin: Place,
    /// One card per resource, in upstream order.
    pub resources: Vec<ResourceCard>,
    /// Set when `resources` is empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<&'static str>,
}

/// Looks up crisis-relief resources near a location in India.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    if query.location.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            reason: "Please enter a location".to_string(),
        });
    }

    let outcome = state
        .lookup
        .search(&query.location)
        .await
        .map_err(|e| match e.current_context() {
            LookupError::RateLimited { retry_after_ms, .. } => ApiError::RateLimited {
                retry_after_ms: *retry_after_ms,
            },
            _ => ApiError::Upstream {
                details: e.to_string(),
            },
        })?;

    match outcome {
        LookupOutcome::LocationNotFound => Err(ApiError::LocationNotFound),
        LookupOutcome::Found { origin, resources } => {
            let notice = resources.is_empty().then_some(NO_RESOURCES);
            Ok(Json(SearchResponse {
                origin,
                resources: resources.iter().map(|r| r.card()).collect(),
                notice,
            }))
        }
    }
}
