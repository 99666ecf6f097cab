//! Geocoding provider configuration.

use integration_geocoding::GeocodingConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// OpenWeatherMap geocoding configuration
///
/// Without an API key the server runs with geocoding disabled and stores
/// placeholder coordinates for new cities.
#[derive(Clone, Serialize, Deserialize)]
pub struct GeocodingAppConfig {
    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key (sensitive - uses `SecretString`)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Cache TTL for successful lookups in minutes (0 disables the cache)
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

impl Default for GeocodingAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            cache_ttl_minutes: default_cache_ttl_minutes(),
        }
    }
}

impl std::fmt::Debug for GeocodingAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingAppConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("cache_ttl_minutes", &self.cache_ttl_minutes)
            .finish()
    }
}

impl GeocodingAppConfig {
    /// Whether a non-empty API key is configured
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|key| !key.expose_secret().trim().is_empty())
    }

    /// Client configuration, or `None` when geocoding is disabled
    #[must_use]
    pub fn to_client_config(&self) -> Option<GeocodingConfig> {
        if !self.is_enabled() {
            return None;
        }
        let api_key = self.api_key.as_ref()?.expose_secret().to_string();
        Some(GeocodingConfig {
            base_url: self.base_url.clone(),
            api_key,
            timeout_secs: self.timeout_secs,
            cache_ttl_minutes: self.cache_ttl_minutes,
        })
    }
}
