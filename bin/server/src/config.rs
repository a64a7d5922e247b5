//! Centralized server configuration.
//!
//! Loaded via the `config` crate from environment variables prefixed with
//! `CRISIS_HUB_`, using `__` to reach nested fields:
//!
//! ```text
//! CRISIS_HUB_BIND_ADDR=0.0.0.0:8080
//! CRISIS_HUB_LOOKUP__RADIUS_METERS=3000
//! CRISIS_HUB_SESSION__SECURE_COOKIES=false
//! ```
//!
//! Every field has a default, so an empty environment yields a working
//! configuration pointed at the public OpenStreetMap services.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};
use crisis_hub_dialogue::DEFAULT_DISTRESS_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Directory holding the static page.
    #[serde(default = "default_site_dir")]
    pub site_dir: PathBuf,

    /// Chat session configuration.
    #[serde(default)]
    pub session: SessionConfig,

    /// Resource lookup configuration.
    #[serde(default)]
    pub lookup: LookupConfig,

    /// Dialogue engine configuration.
    #[serde(default)]
    pub dialogue: DialogueConfig,

    /// Metadata handed to the page.
    #[serde(default)]
    pub site: SiteConfig,
}

fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_site_dir() -> PathBuf {
    PathBuf::from("site")
}

/// Chat session configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Minutes of inactivity after which a chat session is dropped.
    #[serde(default = "default_ttl_minutes")]
    pub ttl_minutes: i64,

    /// Interval between expired-session sweeps, in seconds.
    #[serde(default = "default_cleanup_interval_seconds")]
    pub cleanup_interval_seconds: u64,

    /// Whether to set the Secure flag on cookies (requires HTTPS).
    /// Set to false for local HTTP development.
    #[serde(default = "default_secure_cookies")]
    pub secure_cookies: bool,
}

fn default_ttl_minutes() -> i64 {
    30
}

fn default_cleanup_interval_seconds() -> u64 {
    300
}

fn default_secure_cookies() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: default_ttl_minutes(),
            cleanup_interval_seconds: default_cleanup_interval_seconds(),
            secure_cookies: default_secure_cookies(),
        }
    }
}

/// Upstream lookup configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LookupConfig {
    /// Base URL of the Nominatim instance.
    #[serde(default = "default_nominatim_url")]
    pub nominatim_url: String,

    /// Base URL of the Overpass instance.
    #[serde(default = "default_overpass_url")]
    pub overpass_url: String,

    /// User agent sent upstream. Nominatim rejects anonymous clients.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Search radius around the geocoded location, in meters.
    #[serde(default = "default_radius_meters")]
    pub radius_meters: u32,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Requests allowed per second to each upstream.
    #[serde(default = "default_max_requests_per_second")]
    pub max_requests_per_second: u32,
}

fn default_nominatim_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_overpass_url() -> String {
    "https://overpass-api.de".to_string()
}

fn default_user_agent() -> String {
    concat!("crisis-hub/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_radius_meters() -> u32 {
    5000
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_max_requests_per_second() -> u32 {
    1
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            nominatim_url: default_nominatim_url(),
            overpass_url: default_overpass_url(),
            user_agent: default_user_agent(),
            radius_meters: default_radius_meters(),
            timeout_seconds: default_timeout_seconds(),
            max_requests_per_second: default_max_requests_per_second(),
        }
    }
}

/// Dialogue engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DialogueConfig {
    /// Sentiment below which the chatbot asks whether immediate help is needed.
    #[serde(default = "default_distress_threshold")]
    pub distress_threshold: f64,
}

fn default_distress_threshold() -> f64 {
    DEFAULT_DISTRESS_THRESHOLD
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            distress_threshold: default_distress_threshold(),
        }
    }
}

/// Map and sharing metadata served to the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Initial map centre latitude (centre of India).
    #[serde(default = "default_center_lat")]
    pub center_lat: f64,
    /// Initial map centre longitude.
    #[serde(default = "default_center_lon")]
    pub center_lon: f64,
    /// Initial zoom level.
    #[serde(default = "default_zoom")]
    pub zoom: u8,
    /// Zoom level after a successful search.
    #[serde(default = "default_search_zoom")]
    pub search_zoom: u8,
    /// Tile URL template.
    #[serde(default = "default_tile_url")]
    pub tile_url: String,
    /// Tile attribution.
    #[serde(default = "default_attribution")]
    pub attribution: String,
    /// Title used by the share button.
    #[serde(default = "default_share_title")]
    pub share_title: String,
    /// Text used by the share button.
    #[serde(default = "default_share_text")]
    pub share_text: String,
}

fn default_center_lat() -> f64 {
    20.5937
}

fn default_center_lon() -> f64 {
    78.9629
}

fn default_zoom() -> u8 {
    5
}

fn default_search_zoom() -> u8 {
    12
}

fn default_tile_url() -> String {
    "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string()
}

fn default_attribution() -> String {
    "© OpenStreetMap contributors".to_string()
}

fn default_share_title() -> String {
    "Crisis Resource Hub".to_string()
}

fn default_share_text() -> String {
    "Check out this helpful crisis resource hub!".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            center_lat: default_center_lat(),
            center_lon: default_center_lon(),
            zoom: default_zoom(),
            search_zoom: default_search_zoom(),
            tile_url: default_tile_url(),
            attribution: default_attribution(),
            share_title: default_share_title(),
            share_text: default_share_text(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(
            config::Config::builder().add_source(
                config::Environment::with_prefix("CRISIS_HUB")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            ),
        )
    }

    /// Builds the configuration from an arbitrary set of sources.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read, a value has the wrong
    /// type, or a value is out of range.
    pub fn load(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let at_least_one = |name: &str, value: i64| {
            if value < 1 {
                Err(ConfigError::Message(format!(
                    "{name} must be at least 1, got {value}"
                )))
            } else {
                Ok(())
            }
        };
        at_least_one("session.ttl_minutes", self.session.ttl_minutes)?;
        at_least_one(
            "session.cleanup_interval_seconds",
            i64::try_from(self.session.cleanup_interval_seconds).unwrap_or(i64::MAX),
        )?;
        at_least_one("lookup.radius_meters", i64::from(self.lookup.radius_meters))?;
        at_least_one(
            "lookup.timeout_seconds",
            i64::try_from(self.lookup.timeout_seconds).unwrap_or(i64::MAX),
        )?;
        at_least_one(
            "lookup.max_requests_per_second",
            i64::from(self.lookup.max_requests_per_second),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sources_yield_defaults() {
        let config = ServerConfig::load(config::Config::builder()).expect("load");

        assert_eq!(config.bind_addr, "127.0.0.1:3000");
        assert_eq!(config.site_dir, PathBuf::from("site"));
        assert_eq!(config.session.ttl_minutes, 30);
        assert!(config.session.secure_cookies);
        assert_eq!(config.lookup.radius_meters, 5000);
        assert_eq!(config.lookup.max_requests_per_second, 1);
        assert_eq!(config.dialogue.distress_threshold, -0.5);
        assert_eq!(config.site.zoom, 5);
    }

    #[test]
    fn nested_overrides_apply() {
        let builder = config::Config::builder()
            .set_override("lookup.radius_meters", 2500)
            .expect("override")
            .set_override("session.secure_cookies", false)
            .expect("override");
        let config = ServerConfig::load(builder).expect("load");

        assert_eq!(config.lookup.radius_meters, 2500);
        assert!(!config.session.secure_cookies);
        assert_eq!(config.lookup.timeout_seconds, 10);
    }

    fn load_with(key: &str, value: i64) -> Result<ServerConfig, ConfigError> {
        let builder = config::Config::builder()
            .set_override(key, value)
            .expect("override");
        ServerConfig::load(builder)
    }

    #[test]
    fn zero_values_are_rejected() {
        for key in [
            "session.ttl_minutes",
            "session.cleanup_interval_seconds",
            "lookup.radius_meters",
            "lookup.timeout_seconds",
            "lookup.max_requests_per_second",
        ] {
            let err = load_with(key, 0).expect_err(key);
            assert!(err.to_string().contains(key), "{err}");
        }
    }

    #[test]
    fn negative_ttl_is_rejected() {
        let err = load_with("session.ttl_minutes", -5).expect_err("negative ttl");
        assert!(err.to_string().contains("at least 1"));
    }

    #[test]
    fn minimum_values_are_accepted() {
        let config = load_with("session.ttl_minutes", 1).expect("load");
        assert_eq!(config.session.ttl_minutes, 1);
        let config = load_with("lookup.max_requests_per_second", 1).expect("load");
        assert_eq!(config.lookup.max_requests_per_second, 1);
    }

    #[test]
    fn user_agent_identifies_service() {
        assert!(LookupConfig::default().user_agent.starts_with("crisis-hub/"));
    }
}
