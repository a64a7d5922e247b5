//! Nearby resource lookup for the crisis-hub service.
//!
//! This crate provides:
//!
//! - **Geocoder**: place name to coordinates, via Nominatim
//! - **Amenity finder**: shelters, hospitals and food banks near a point, via Overpass
//! - **Resource lookup**: the two combined into a single search
//! - **Rate limiter**: keeps requests within the public services' usage policies

pub mod error;
pub mod geo;
pub mod geocode;
mod http;
pub mod lookup;
pub mod overpass;
pub mod rate_limit;
pub mod resource;

pub use error::{LookupError, Upstream};
pub use geo::{Coordinates, Place};
pub use geocode::{Geocoder, NominatimGeocoder};
pub use http::http_client;
pub use lookup::{LookupOutcome, ResourceLookup};
pub use overpass::{Amenity, AmenityFinder, OverpassClient};
pub use rate_limit::{RateLimitConfig, RateLimitResult, RateLimiter};
pub use resource::{Resource, ResourceCard};
