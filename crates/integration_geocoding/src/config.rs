//! Geocoding client configuration

use std::fmt;

use serde::{Deserialize, Serialize};

/// Configuration for the OpenWeatherMap geocoding client
#[derive(Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Base URL of the API (path `/geo/1.0/direct` is appended)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key sent as `appid`
    #[serde(default, skip_serializing)]
    pub api_key: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Cache TTL for successful lookups in minutes (0 to disable)
    #[serde(default = "default_cache_ttl_minutes")]
    pub cache_ttl_minutes: u64,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org".to_string()
}

const fn default_timeout_secs() -> u64 {
    5
}

const fn default_cache_ttl_minutes() -> u64 {
    60
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
            cache_ttl_minutes: default_cache_ttl_minutes(),
        }
    }
}

impl fmt::Debug for GeocodingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeocodingConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .field("cache_ttl_minutes", &self.cache_ttl_minutes)
            .finish()
    }
}

impl GeocodingConfig {
    /// Create a configuration with the given API key and default settings
    #[must_use]
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Create a configuration suitable for testing against a mock server
    #[must_use]
    pub fn for_testing(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: "test-key".to_string(),
            timeout_secs: 2,
            cache_ttl_minutes: 0,
        }
    }

    /// Whether an API key has been provided
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Full URL of the direct geocoding endpoint
    #[must_use]
    pub fn direct_url(&self) -> String {
        format!("{}/geo/1.0/direct", self.base_url.trim_end_matches('/'))
    }
}
