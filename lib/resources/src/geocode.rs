//! Place name to coordinates.

use crate::error::{LookupError, Upstream};
use crate::geo::{Coordinates, Place};
use crate::http::get_json;
use crate::rate_limit::RateLimiter;
use async_trait::async_trait;
use crisis_hub_core::Result;
use serde::Deserialize;
use std::sync::Arc;
use tracing::instrument;

/// Resolves free-text locations.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Returns the best match for `query`, or `None` if nothing matched.
    async fn geocode(&self, query: &str) -> Result<Option<Place>, LookupError>;
}

/// Geocoder backed by a Nominatim `/search` endpoint.
///
/// Every query is suffixed with `, India` so that ambiguous names resolve
/// inside the country.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
    limiter: Arc<RateLimiter>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
    display_name: Option<String>,
}

impl NominatimGeocoder {
    /// Creates a geocoder for the Nominatim instance at `base_url`.
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, limiter: Arc<RateLimiter>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            limiter,
        }
    }

    fn parse_hit(hit: SearchHit) -> Result<Place, LookupError> {
        let coordinate = |raw: &str| {
            raw.parse::<f64>().map_err(|e| LookupError::InvalidResponse {
                upstream: Upstream::Nominatim,
                reason: format!("bad coordinate {raw:?}: {e}"),
            })
        };
        Ok(Place {
            location: Coordinates::new(coordinate(&hit.lat)?, coordinate(&hit.lon)?),
            name: hit.display_name,
        })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    #[instrument(skip(self))]
    async fn geocode(&self, query: &str) -> Result<Option<Place>, LookupError> {
        let q = format!("{query}, India");
        let request = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[("format", "json"), ("q", q.as_str())]);

        let hits: Vec<SearchHit> = get_json(request, Upstream::Nominatim, &self.limiter).await?;
        tracing::debug!(hits = hits.len(), "geocoding finished");

        hits.into_iter().next().map(Self::parse_hit).transpose()
    }
}
