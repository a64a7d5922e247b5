//! Shared plumbing for the upstream HTTP clients.

use crate::error::{LookupError, Upstream};
use crate::rate_limit::{RateLimitResult, RateLimiter};
use crisis_hub_core::Result;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Builds the HTTP client used for upstream lookups.
///
/// Nominatim's usage policy requires an identifying user agent.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialised.
pub fn http_client(user_agent: &str, timeout: Duration) -> Result<reqwest::Client, LookupError> {
    Ok(reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
        .map_err(|e| LookupError::ClientSetup {
            reason: e.to_string(),
        })?)
}

/// Sends `request` if the limiter allows it and decodes a JSON body.
pub(crate) async fn get_json<T: DeserializeOwned>(
    request: RequestBuilder,
    upstream: Upstream,
    limiter: &RateLimiter,
) -> Result<T, LookupError> {
    if let RateLimitResult::Exceeded { retry_after, .. } =
        limiter.check_and_increment(upstream.as_str())
    {
        tracing::warn!(%upstream, "upstream rate limit reached");
        return Err(LookupError::RateLimited {
            upstream,
            retry_after_ms: u64::try_from(retry_after.num_milliseconds()).unwrap_or(0),
        }
        .into());
    }

    let response = request.send().await.map_err(|e| {
        tracing::warn!(error = %e, %upstream, "upstream request failed");
        if e.is_timeout() {
            LookupError::Timeout { upstream }
        } else {
            LookupError::ConnectionFailed {
                upstream,
                reason: e.to_string(),
            }
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(%upstream, status = status.as_u16(), "upstream returned error status");
        return Err(LookupError::UnexpectedStatus {
            upstream,
            status: status.as_u16(),
        }
        .into());
    }

    Ok(response
        .json::<T>()
        .await
        .map_err(|e| LookupError::InvalidResponse {
            upstream,
            reason: e.to_string(),
        })?)
}
