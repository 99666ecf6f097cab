//! Ingestion defaults and resolver tuning.

use std::time::Duration;

use application::{IngestionServiceConfig, LocationResolverConfig};
use domain::{Location, Observation, UserId};
use serde::{Deserialize, Serialize};

/// Ingestion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestionConfig {
    /// Upper bound on one geocoding call made while resolving or querying a city
    #[serde(default = "default_geocode_timeout_ms")]
    pub geocode_timeout_ms: u64,

    /// Country stored when the provider reports none
    #[serde(default = "default_country")]
    pub default_country: String,

    /// Condition stored when the request omits one
    #[serde(default = "default_condition")]
    pub default_condition: String,

    /// Wind speed stored when the request omits one
    #[serde(default = "default_wind_speed")]
    pub default_wind_speed: f64,
}

const fn default_geocode_timeout_ms() -> u64 {
    5_000
}

fn default_country() -> String {
    Location::DEFAULT_COUNTRY.to_string()
}

fn default_condition() -> String {
    Observation::DEFAULT_CONDITION.to_string()
}

const fn default_wind_speed() -> f64 {
    Observation::DEFAULT_WIND_SPEED
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            geocode_timeout_ms: default_geocode_timeout_ms(),
            default_country: default_country(),
            default_condition: default_condition(),
            default_wind_speed: default_wind_speed(),
        }
    }
}

impl IngestionConfig {
    #[must_use]
    pub const fn geocode_timeout(&self) -> Duration {
        Duration::from_millis(self.geocode_timeout_ms)
    }

    #[must_use]
    pub fn resolver_config(&self) -> LocationResolverConfig {
        LocationResolverConfig {
            geocode_timeout: self.geocode_timeout(),
            default_country: self.default_country.clone(),
            owner: UserId::system(),
        }
    }

    #[must_use]
    pub fn service_config(&self) -> IngestionServiceConfig {
        IngestionServiceConfig {
            default_condition: self.default_condition.clone(),
            default_wind_speed: self.default_wind_speed,
        }
    }
}
