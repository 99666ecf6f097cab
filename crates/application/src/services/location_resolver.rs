//! Location resolver
//!
//! Turns a city name into a [`LocationId`], creating the location on first
//! sight. This is the only component allowed to create locations.
//!
//! Resolution order:
//! 1. exact-name lookup in the location store (no provider call on a hit)
//! 2. bounded geocoding lookup, falling back to sentinel coordinates
//! 3. insert; a uniqueness conflict means a concurrent request won the race,
//!    so the row is re-read exactly once and its id returned

use std::{fmt, sync::Arc, time::Duration};

use domain::{
    entities::Location,
    value_objects::{GeoLocation, LocationId, UserId},
};
use tracing::{debug, info, instrument, warn};

use super::geocode_lookup::lookup_or_none;
use crate::{
    error::ApplicationError,
    ports::{GeocodePort, LocationStorePort},
};

/// Configuration for location resolution
#[derive(Debug, Clone)]
pub struct LocationResolverConfig {
    /// Upper bound on a single provider call (default: 5s)
    pub geocode_timeout: Duration,
    /// Country stored when the provider reports none (default: "USA")
    pub default_country: String,
    /// Identity recorded as owner of created locations
    pub owner: UserId,
}

impl Default for LocationResolverConfig {
    fn default() -> Self {
        Self {
            geocode_timeout: Duration::from_secs(5),
            default_country: Location::DEFAULT_COUNTRY.to_string(),
            owner: UserId::system(),
        }
    }
}

/// Resolves city names to location ids
#[derive(Clone)]
pub struct LocationResolver {
    locations: Arc<dyn LocationStorePort>,
    geocoder: Arc<dyn GeocodePort>,
    config: LocationResolverConfig,
}

impl fmt::Debug for LocationResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationResolver")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl LocationResolver {
    #[must_use]
    pub fn new(
        locations: Arc<dyn LocationStorePort>,
        geocoder: Arc<dyn GeocodePort>,
        config: LocationResolverConfig,
    ) -> Self {
        Self {
            locations,
            geocoder,
            config,
        }
    }

    /// Resolve `name` to a location id, creating the location if needed
    ///
    /// Provider failures never fail resolution; only storage errors do.
    #[instrument(skip(self))]
    pub async fn resolve(&self, name: &str) -> Result<LocationId, ApplicationError> {
        if let Some(existing) = self.locations.find_by_name(name).await? {
            debug!(location_id = %existing.id(), "Location already known");
            return Ok(existing.id());
        }

        let location = self.build_location(name).await;

        match self.locations.insert(&location).await {
            Ok(()) => {
                info!(
                    location_id = %location.id(),
                    country = %location.country(),
                    placeholder = location.has_placeholder_coordinates(),
                    "Created location"
                );
                Ok(location.id())
            },
            Err(ApplicationError::Conflict(reason)) => {
                warn!(%reason, "Location created concurrently, re-reading");
                self.locations
                    .find_by_name(name)
                    .await?
                    .map(|winner| winner.id())
                    .ok_or_else(|| {
                        ApplicationError::Storage(format!(
                            "location '{name}' conflicted on insert but could not be re-read"
                        ))
                    })
            },
            Err(e) => Err(e),
        }
    }

    async fn build_location(&self, name: &str) -> Location {
        let found =
            lookup_or_none(self.geocoder.as_ref(), name, self.config.geocode_timeout).await;

        let (coordinates, country) = match found {
            Some(m) => (
                m.location,
                m.country
                    .filter(|c| !c.trim().is_empty())
                    .unwrap_or_else(|| self.config.default_country.clone()),
            ),
            None => (GeoLocation::sentinel(), self.config.default_country.clone()),
        };

        Location::new(name, country, coordinates, self.config.owner)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use parking_lot::Mutex;

    use super::*;
    use crate::{
        ports::{GeocodeMatch, MockGeocodePort, MockLocationStorePort},
        services::test_support::InMemoryLocationStore,
    };

    fn columbus() -> GeoLocation {
        GeoLocation::new(39.96, -83.0).unwrap()
    }

    fn geocoder_returning(m: Option<GeocodeMatch>) -> Arc<MockGeocodePort> {
        let mut geocoder = MockGeocodePort::new();
        geocoder
            .expect_lookup()
            .returning(move |_| Ok(m.clone()));
        Arc::new(geocoder)
    }

    fn resolver(
        store: Arc<dyn LocationStorePort>,
        geocoder: Arc<dyn GeocodePort>,
    ) -> LocationResolver {
        LocationResolver::new(store, geocoder, LocationResolverConfig::default())
    }

    #[tokio::test]
    async fn known_location_skips_provider() {
        let existing = Location::new("Columbus", "US", columbus(), UserId::system());
        let existing_id = existing.id();

        let mut store = MockLocationStorePort::new();
        store
            .expect_find_by_name()
            .returning(move |_| Ok(Some(existing.clone())));
        store.expect_insert().never();

        let mut geocoder = MockGeocodePort::new();
        geocoder.expect_lookup().never();

        let id = resolver(Arc::new(store), Arc::new(geocoder))
            .resolve("Columbus")
            .await
            .unwrap();
        assert_eq!(id, existing_id);
    }

    #[tokio::test]
    async fn resolving_twice_yields_same_id_and_one_row() {
        let store = Arc::new(InMemoryLocationStore::default());
        let resolver = resolver(
            store.clone(),
            geocoder_returning(Some(GeocodeMatch::new(columbus()).with_country("US"))),
        );

        let first = resolver.resolve("Columbus").await.unwrap();
        let second = resolver.resolve("Columbus").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.count_named("Columbus"), 1);
        let row = store.find_by_name("Columbus").await.unwrap().unwrap();
        assert_eq!(row.coordinates(), columbus());
        assert_eq!(row.country(), "US");
    }

    #[tokio::test]
    async fn provider_miss_stores_sentinel_and_default_country() {
        let store = Arc::new(InMemoryLocationStore::default());
        let resolver = resolver(store.clone(), geocoder_returning(None));

        resolver.resolve("Atlantis").await.unwrap();

        let row = store.find_by_name("Atlantis").await.unwrap().unwrap();
        assert!(row.has_placeholder_coordinates());
        assert_eq!(row.country(), "USA");
        assert!(row.owner_id().is_system());
    }

    #[tokio::test]
    async fn provider_error_stores_sentinel() {
        let mut geocoder = MockGeocodePort::new();
        geocoder
            .expect_lookup()
            .returning(|_| Err(ApplicationError::ExternalService("connection refused".into())));
        let store = Arc::new(InMemoryLocationStore::default());

        resolver(store.clone(), Arc::new(geocoder))
            .resolve("Columbus")
            .await
            .unwrap();

        let row = store.find_by_name("Columbus").await.unwrap().unwrap();
        assert_eq!(row.coordinates(), GeoLocation::sentinel());
    }

    #[tokio::test]
    async fn blank_provider_country_uses_default() {
        let store = Arc::new(InMemoryLocationStore::default());
        let resolver = resolver(
            store.clone(),
            geocoder_returning(Some(GeocodeMatch::new(columbus()).with_country(" "))),
        );

        resolver.resolve("Columbus").await.unwrap();
        let row = store.find_by_name("Columbus").await.unwrap().unwrap();
        assert_eq!(row.country(), "USA");
    }

    #[tokio::test]
    async fn names_are_matched_exactly() {
        let store = Arc::new(InMemoryLocationStore::default());
        let resolver = resolver(store.clone(), geocoder_returning(None));

        let a = resolver.resolve("Columbus").await.unwrap();
        let b = resolver.resolve("columbus").await.unwrap();
        let c = resolver.resolve("Columbus ").await.unwrap();

        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(store.rows.lock().len(), 3);
    }

    /// Store whose first lookup misses a row that is already present,
    /// reproducing the check-then-insert race.
    struct RacingStore {
        inner: InMemoryLocationStore,
        hide_next_lookup: AtomicBool,
    }

    #[async_trait]
    impl LocationStorePort for RacingStore {
        async fn find_by_name(&self, name: &str) -> Result<Option<Location>, ApplicationError> {
            if self.hide_next_lookup.swap(false, Ordering::SeqCst) {
                return Ok(None);
            }
            self.inner.find_by_name(name).await
        }

        async fn insert(&self, location: &Location) -> Result<(), ApplicationError> {
            self.inner.insert(location).await
        }
    }

    #[tokio::test]
    async fn conflict_is_recovered_with_winner_id() {
        let winner = Location::new("Columbus", "US", columbus(), UserId::system());
        let winner_id = winner.id();
        let store = Arc::new(RacingStore {
            inner: InMemoryLocationStore {
                rows: Mutex::new(vec![winner]),
            },
            hide_next_lookup: AtomicBool::new(true),
        });

        let id = resolver(store.clone(), geocoder_returning(None))
            .resolve("Columbus")
            .await
            .unwrap();

        assert_eq!(id, winner_id);
        assert_eq!(store.inner.count_named("Columbus"), 1);
    }

    #[tokio::test]
    async fn conflict_without_row_is_storage_error() {
        let mut store = MockLocationStorePort::new();
        store.expect_find_by_name().times(2).returning(|_| Ok(None));
        store
            .expect_insert()
            .times(1)
            .returning(|_| Err(ApplicationError::Conflict("duplicate".into())));

        let err = resolver(Arc::new(store), geocoder_returning(None))
            .resolve("Columbus")
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Storage(_)));
    }

    #[tokio::test]
    async fn other_insert_errors_propagate() {
        let mut store = MockLocationStorePort::new();
        store.expect_find_by_name().times(1).returning(|_| Ok(None));
        store
            .expect_insert()
            .returning(|_| Err(ApplicationError::Connection("pool timed out".into())));

        let err = resolver(Arc::new(store), geocoder_returning(None))
            .resolve("Columbus")
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Connection(_)));
    }

    #[tokio::test]
    async fn concurrent_first_sight_creates_one_location() {
        let store = Arc::new(InMemoryLocationStore::default());
        let resolver = resolver(store.clone(), geocoder_returning(None));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let resolver = resolver.clone();
                tokio::spawn(async move { resolver.resolve("Springfield").await })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap());
        }

        assert_eq!(store.count_named("Springfield"), 1);
        assert!(ids.windows(2).all(|w| w[0] == w[1]));
    }
}
