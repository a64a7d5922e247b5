//! Nearby amenity search through the Overpass API.

use crate::error::{LookupError, Upstream};
use crate::geo::Coordinates;
use crate::http::get_json;
use crate::rate_limit::RateLimiter;
use crate::resource::Resource;
use async_trait::async_trait;
use crisis_hub_core::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::instrument;

/// Amenity kinds counted as crisis-relief resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Amenity {
    Shelter,
    Hospital,
    FoodBank,
}

impl Amenity {
    /// Every amenity searched for by default.
    pub const ALL: [Amenity; 3] = [Amenity::Shelter, Amenity::Hospital, Amenity::FoodBank];

    /// The OpenStreetMap `amenity` tag value.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Shelter => "shelter",
            Self::Hospital => "hospital",
            Self::FoodBank => "food_bank",
        }
    }
}

/// Finds relief resources around a point.
#[async_trait]
pub trait AmenityFinder: Send + Sync {
    /// Returns every resource within `radius_meters` of `center`.
    async fn nearby(
        &self,
        center: Coordinates,
        radius_meters: u32,
    ) -> Result<Vec<Resource>, LookupError>;
}

/// Builds an Overpass QL query for tagged nodes around a point.
#[must_use]
pub fn build_query(center: Coordinates, radius_meters: u32, amenities: &[Amenity]) -> String {
    let mut query = String::from("[out:json];\n(\n");
    for amenity in amenities {
        let _ = writeln!(
            query,
            "  node[\"amenity\"=\"{}\"](around:{},{},{});",
            amenity.tag(),
            radius_meters,
            center.lat,
            center.lon
        );
    }
    query.push_str(");\nout body;\n>;\nout skel qt;\n");
    query
}

/// Amenity finder backed by an Overpass `/api/interpreter` endpoint.
#[derive(Debug, Clone)]
pub struct OverpassClient {
    client: reqwest::Client,
    base_url: String,
    limiter: Arc<RateLimiter>,
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<Element>,
}

#[derive(Debug, Deserialize)]
struct Element {
    id: u64,
    lat: Option<f64>,
    lon: Option<f64>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

impl OverpassClient {
    /// Creates a client for the Overpass instance at `base_url`.
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, limiter: Arc<RateLimiter>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            limiter,
        }
    }
}

#[async_trait]
impl AmenityFinder for OverpassClient {
    #[instrument(skip(self), fields(lat = center.lat, lon = center.lon))]
    async fn nearby(
        &self,
        center: Coordinates,
        radius_meters: u32,
    ) -> Result<Vec<Resource>, LookupError> {
        let query = build_query(center, radius_meters, &Amenity::ALL);
        let request = self
            .client
            .get(format!("{}/api/interpreter", self.base_url))
            .query(&[("data", query.as_str())]);

        let response: OverpassResponse = get_json(request, Upstream::Overpass, &self.limiter).await?;

        // Skeleton elements from the recursion step carry no position.
        let resources: Vec<Resource> = response
            .elements
            .into_iter()
            .filter_map(|element| {
                let location = Coordinates::new(element.lat?, element.lon?);
                Some(Resource::from_tags(element.id, location, &element.tags))
            })
            .collect();

        tracing::debug!(count = resources.len(), "overpass query finished");
        Ok(resources)
    }
}
