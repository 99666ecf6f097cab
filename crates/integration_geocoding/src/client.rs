//! OpenWeatherMap direct geocoding client
//!
//! Resolves a city name with `GET /geo/1.0/direct?q=..&limit=1&appid=..`.
//! Only the first candidate is used. Successful lookups are cached.

use std::time::Duration;

use async_trait::async_trait;
use domain::value_objects::GeoLocation;
use moka::future::Cache;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};

use crate::{config::GeocodingConfig, error::GeocodingError, models::DirectGeocodeResult};

/// A resolved city
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedCity {
    pub location: GeoLocation,
    /// Provider's canonical name for the city
    pub name: Option<String>,
    /// ISO 3166 country code
    pub country: Option<String>,
}

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Resolve a city name; `Ok(None)` when the provider has no candidate
    async fn geocode(&self, city: &str) -> Result<Option<GeocodedCity>, GeocodingError>;
}

/// Geocoding client for the OpenWeatherMap API
#[derive(Debug)]
pub struct OpenWeatherMapGeocoder {
    client: Client,
    config: GeocodingConfig,
    cache: Option<Cache<String, GeocodedCity>>,
}

impl OpenWeatherMapGeocoder {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &GeocodingConfig) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("SkyView/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        let cache = (config.cache_ttl_minutes > 0).then(|| {
            Cache::builder()
                .max_capacity(1000)
                .time_to_live(Duration::from_secs(config.cache_ttl_minutes * 60))
                .build()
        });

        Ok(Self {
            client,
            config: config.clone(),
            cache,
        })
    }

    /// Map the first candidate to a city, rejecting out-of-range coordinates
    fn first_city(results: Vec<DirectGeocodeResult>) -> Result<Option<GeocodedCity>, GeocodingError> {
        let Some(first) = results.into_iter().next() else {
            return Ok(None);
        };

        let location = GeoLocation::new(first.lat, first.lon)
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        Ok(Some(GeocodedCity {
            location,
            name: first.name,
            country: first.country.filter(|c| !c.is_empty()),
        }))
    }
}

#[async_trait]
impl GeocodingClient for OpenWeatherMapGeocoder {
    #[instrument(skip(self))]
    async fn geocode(&self, city: &str) -> Result<Option<GeocodedCity>, GeocodingError> {
        if city.trim().is_empty() {
            return Ok(None);
        }

        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(city).await {
                debug!("Geocoding cache hit");
                return Ok(Some(hit));
            }
        }

        let params = [
            ("q", city),
            ("limit", "1"),
            ("appid", self.config.api_key.as_str()),
        ];

        let response = self
            .client
            .get(self.config.direct_url())
            .query(&params)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {},
            StatusCode::UNAUTHORIZED => return Err(GeocodingError::Unauthorized),
            StatusCode::TOO_MANY_REQUESTS => return Err(GeocodingError::RateLimitExceeded),
            status => {
                return Err(GeocodingError::RequestFailed(format!("HTTP {status}")));
            },
        }

        let results: Vec<DirectGeocodeResult> = response
            .json()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        let found = Self::first_city(results)?;

        if let (Some(cache), Some(city_match)) = (&self.cache, &found) {
            cache.insert(city.to_string(), city_match.clone()).await;
        }

        debug!(found = found.is_some(), "Geocoded city");
        Ok(found)
    }
}
