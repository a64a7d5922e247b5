//! Error types for the resources crate.
//!
//! "Location not found" and "no resources nearby" are ordinary outcomes,
//! not errors. `LookupError` covers the cases where an upstream service
//! could not answer at all.

use std::fmt;

/// The public services a lookup depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Upstream {
    /// Nominatim geocoding.
    Nominatim,
    /// Overpass amenity queries.
    Overpass,
}

impl Upstream {
    /// Returns a stable lowercase name, used as the rate limit key.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Nominatim => "nominatim",
            Self::Overpass => "overpass",
        }
    }
}

impl fmt::Display for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from resource lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The search text was blank.
    EmptyQuery,
    /// The HTTP client could not be built.
    ClientSetup { reason: String },
    /// Connection to the service failed.
    ConnectionFailed { upstream: Upstream, reason: String },
    /// Timed out waiting for the service.
    Timeout { upstream: Upstream },
    /// The service answered with a non-success status.
    UnexpectedStatus { upstream: Upstream, status: u16 },
    /// The response body could not be decoded.
    InvalidResponse { upstream: Upstream, reason: String },
    /// Too many requests in the current window.
    RateLimited {
        upstream: Upstream,
        retry_after_ms: u64,
    },
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyQuery => write!(f, "search location is empty"),
            Self::ClientSetup { reason } => {
                write!(f, "failed to build http client: {reason}")
            }
            Self::ConnectionFailed { upstream, reason } => {
                write!(f, "connection to {upstream} failed: {reason}")
            }
            Self::Timeout { upstream } => write!(f, "request to {upstream} timed out"),
            Self::UnexpectedStatus { upstream, status } => {
                write!(f, "{upstream} responded with status {status}")
            }
            Self::InvalidResponse { upstream, reason } => {
                write!(f, "invalid response from {upstream}: {reason}")
            }
            Self::RateLimited {
                upstream,
                retry_after_ms,
            } => {
                write!(f, "rate limited by {upstream}, retry after {retry_after_ms}ms")
            }
        }
    }
}

impl std::error::Error for LookupError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_error_names_upstream() {
        let err = LookupError::UnexpectedStatus {
            upstream: Upstream::Overpass,
            status: 504,
        };
        assert!(err.to_string().contains("overpass"));
        assert!(err.to_string().contains("504"));
    }

    #[test]
    fn rate_limited_display() {
        let err = LookupError::RateLimited {
            upstream: Upstream::Nominatim,
            retry_after_ms: 250,
        };
        assert!(err.to_string().contains("250ms"));
    }
}
