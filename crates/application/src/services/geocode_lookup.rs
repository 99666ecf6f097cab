//! Bounded geocoding lookup shared by the resolver and the query service

use std::time::Duration;

use tracing::{debug, warn};

use crate::ports::{GeocodeMatch, GeocodePort};

/// Call the provider under `limit` and collapse every failure into `None`
///
/// Not-found, timeout and provider errors are externally identical; the
/// `reason` field in the log is the only place they are told apart.
pub(crate) async fn lookup_or_none(
    geocoder: &dyn GeocodePort,
    name: &str,
    limit: Duration,
) -> Option<GeocodeMatch> {
    match tokio::time::timeout(limit, geocoder.lookup(name)).await {
        Ok(Ok(Some(found))) => {
            debug!(
                city = %name,
                matched = found.name.as_deref().unwrap_or(name),
                latitude = found.location.latitude(),
                longitude = found.location.longitude(),
                "Geocoding provider resolved city"
            );
            Some(found)
        },
        Ok(Ok(None)) => {
            warn!(city = %name, reason = "not_found", "Geocoding provider has no match");
            None
        },
        Ok(Err(e)) => {
            warn!(city = %name, reason = "provider_error", error = %e, "Geocoding lookup failed");
            None
        },
        Err(_) => {
            warn!(
                city = %name,
                reason = "timeout",
                timeout_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
                "Geocoding lookup timed out"
            );
            None
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ApplicationError, ports::MockGeocodePort};
    use async_trait::async_trait;
    use domain::GeoLocation;

    struct SlowGeocoder;

    #[async_trait]
    impl GeocodePort for SlowGeocoder {
        async fn lookup(
            &self,
            _name: &str,
        ) -> Result<Option<GeocodeMatch>, ApplicationError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Some(GeocodeMatch::new(GeoLocation::new(1.0, 1.0).unwrap())))
        }
    }

    #[tokio::test]
    async fn passes_through_match() {
        let mut geocoder = MockGeocodePort::new();
        geocoder.expect_lookup().returning(|_| {
            Ok(Some(GeocodeMatch::new(
                GeoLocation::new(39.96, -83.0).unwrap(),
            )))
        });

        let found = lookup_or_none(&geocoder, "Columbus", Duration::from_secs(1)).await;
        assert_eq!(
            found.map(|m| m.location),
            Some(GeoLocation::new(39.96, -83.0).unwrap())
        );
    }

    #[tokio::test]
    async fn keeps_provider_name_and_country() {
        let mut geocoder = MockGeocodePort::new();
        geocoder.expect_lookup().returning(|_| {
            Ok(Some(
                GeocodeMatch::new(GeoLocation::new(48.14, 11.58).unwrap())
                    .with_name("Munich")
                    .with_country("DE"),
            ))
        });

        let found = lookup_or_none(&geocoder, "München", Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(found.name.as_deref(), Some("Munich"));
        assert_eq!(found.country.as_deref(), Some("DE"));
    }

    #[tokio::test]
    async fn provider_error_becomes_none() {
        let mut geocoder = MockGeocodePort::new();
        geocoder
            .expect_lookup()
            .returning(|_| Err(ApplicationError::ExternalService("503".into())));

        assert!(
            lookup_or_none(&geocoder, "Columbus", Duration::from_secs(1))
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn timeout_becomes_none() {
        let found = lookup_or_none(&SlowGeocoder, "Columbus", Duration::from_millis(20)).await;
        assert!(found.is_none());
    }
}
