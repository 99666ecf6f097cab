//! Geocoding adapter - Implements GeocodePort using integration_geocoding

use std::sync::Arc;

use application::{
    error::ApplicationError,
    ports::{GeocodeMatch, GeocodePort},
};
use async_trait::async_trait;
use integration_geocoding::{
    GeocodedCity, GeocodingClient, GeocodingConfig, GeocodingError, OpenWeatherMapGeocoder,
};
use tracing::{debug, instrument};

/// Adapter for city geocoding through an integration client
pub struct GeocodingAdapter {
    client: Arc<dyn GeocodingClient>,
}

impl std::fmt::Debug for GeocodingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingAdapter").finish_non_exhaustive()
    }
}

impl GeocodingAdapter {
    #[must_use]
    pub fn new(client: Arc<dyn GeocodingClient>) -> Self {
        Self { client }
    }

    /// Build an adapter backed by the OpenWeatherMap client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn open_weather_map(config: &GeocodingConfig) -> Result<Self, ApplicationError> {
        let client = OpenWeatherMapGeocoder::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::new(Arc::new(client)))
    }

    /// Map integration geocoding error to application error
    fn map_error(err: GeocodingError) -> ApplicationError {
        match err {
            GeocodingError::ParseError(e) => {
                ApplicationError::ExternalService(format!("malformed geocoding response: {e}"))
            },
            other => ApplicationError::ExternalService(other.to_string()),
        }
    }

    fn map_city(city: GeocodedCity) -> GeocodeMatch {
        GeocodeMatch {
            location: city.location,
            country: city.country,
            name: city.name,
        }
    }
}

#[async_trait]
impl GeocodePort for GeocodingAdapter {
    #[instrument(skip(self))]
    async fn lookup(&self, name: &str) -> Result<Option<GeocodeMatch>, ApplicationError> {
        let city = self.client.geocode(name).await.map_err(Self::map_error)?;
        debug!(found = city.is_some(), "Geocoding adapter lookup finished");
        Ok(city.map(Self::map_city))
    }
}

/// Geocoder used when no provider is configured; every lookup is a miss
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledGeocoder;

#[async_trait]
impl GeocodePort for DisabledGeocoder {
    async fn lookup(&self, _name: &str) -> Result<Option<GeocodeMatch>, ApplicationError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use domain::GeoLocation;

    use super::*;

    struct FixedClient(fn() -> Result<Option<GeocodedCity>, GeocodingError>);

    #[async_trait]
    impl GeocodingClient for FixedClient {
        async fn geocode(&self, _city: &str) -> Result<Option<GeocodedCity>, GeocodingError> {
            (self.0)()
        }
    }

    fn adapter(f: fn() -> Result<Option<GeocodedCity>, GeocodingError>) -> GeocodingAdapter {
        GeocodingAdapter::new(Arc::new(FixedClient(f)))
    }

    #[tokio::test]
    async fn maps_found_city() {
        let found = adapter(|| {
            Ok(Some(GeocodedCity {
                location: GeoLocation::new(39.96, -83.0).unwrap(),
                name: Some("Columbus".to_string()),
                country: Some("US".to_string()),
            }))
        })
        .lookup("Columbus")
        .await
        .unwrap()
        .unwrap();

        assert_eq!(found.country.as_deref(), Some("US"));
        assert_eq!(found.name.as_deref(), Some("Columbus"));
    }

    #[tokio::test]
    async fn miss_is_none() {
        let found = adapter(|| Ok(None)).lookup("Atlantis").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn client_errors_are_external_service_errors() {
        let err = adapter(|| Err(GeocodingError::Timeout))
            .lookup("Columbus")
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::ExternalService(_)));
        assert!(err.to_string().contains("timed out"));

        let err = adapter(|| Err(GeocodingError::ParseError("bad json".into())))
            .lookup("Columbus")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("malformed"));
    }

    #[tokio::test]
    async fn disabled_geocoder_never_finds() {
        assert!(DisabledGeocoder.lookup("Columbus").await.unwrap().is_none());
    }

    #[test]
    fn open_weather_map_constructor_builds() {
        let adapter = GeocodingAdapter::open_weather_map(&GeocodingConfig::with_api_key("k"));
        assert!(adapter.is_ok());
    }
}
