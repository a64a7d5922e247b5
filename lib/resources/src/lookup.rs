//! Location search combining geocoding and the amenity query.

use crate::error::LookupError;
use crate::geo::Place;
use crate::geocode::Geocoder;
use crate::overpass::AmenityFinder;
use crate::resource::Resource;
use crisis_hub_core::{LookupId, Result};
use std::sync::Arc;
use tracing::instrument;

/// Default search radius around the geocoded location.
pub const DEFAULT_RADIUS_METERS: u32 = 5000;

/// The result of a location search.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    /// The geocoder found nothing for the query.
    LocationNotFound,
    /// The location was found; `resources` may be empty.
    Found {
        origin: Place,
        resources: Vec<Resource>,
    },
}

/// Finds relief resources near a named location.
#[derive(Clone)]
pub struct ResourceLookup {
    geocoder: Arc<dyn Geocoder>,
    finder: Arc<dyn AmenityFinder>,
    radius_meters: u32,
}

impl ResourceLookup {
    /// Creates a lookup over the given geocoder and amenity finder.
    #[must_use]
    pub fn new(geocoder: Arc<dyn Geocoder>, finder: Arc<dyn AmenityFinder>) -> Self {
        Self {
            geocoder,
            finder,
            radius_meters: DEFAULT_RADIUS_METERS,
        }
    }

    /// Sets the search radius.
    #[must_use]
    pub fn with_radius(mut self, radius_meters: u32) -> Self {
        self.radius_meters = radius_meters;
        self
    }

    /// Searches for resources around `location`.
    ///
    /// # Errors
    ///
    /// Returns an error for a blank query or when an upstream service fails.
    /// An unknown location and an empty neighbourhood are both `Ok`.
    #[instrument(skip(self), fields(lookup_id = %LookupId::new()))]
    pub async fn search(&self, location: &str) -> Result<LookupOutcome, LookupError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(LookupError::EmptyQuery.into());
        }

        let Some(origin) = self.geocoder.geocode(location).await? else {
            tracing::info!("location not found");
            return Ok(LookupOutcome::LocationNotFound);
        };

        let resources = self
            .finder
            .nearby(origin.location, self.radius_meters)
            .await?;

        if resources.is_empty() {
            tracing::info!("no resources found nearby");
        } else {
            tracing::info!(count = resources.len(), "resources found");
        }

        Ok(LookupOutcome::Found { origin, resources })
    }
}

impl std::fmt::Debug for ResourceLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceLookup")
            .field("radius_meters", &self.radius_meters)
            .finish_non_exhaustive()
    }
}
