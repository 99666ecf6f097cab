//! Read-side queries: observation search, coordinate lookup, feedback totals

use std::{fmt, sync::Arc, time::Duration};

use domain::{entities::FeedbackTotals, value_objects::GeoLocation};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::geocode_lookup::lookup_or_none;
use crate::{
    error::ApplicationError,
    ports::{FeedbackStorePort, GeocodePort, LocationStorePort, ObservationStorePort, ObservationView},
};

/// Which tier answered a coordinate lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoordinateSource {
    #[serde(rename = "db")]
    Database,
    #[serde(rename = "api")]
    Provider,
}

/// Coordinates for a city and where they came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateLookup {
    pub coordinates: GeoLocation,
    pub source: CoordinateSource,
}

/// Service for read-only queries
#[derive(Clone)]
pub struct QueryService {
    locations: Arc<dyn LocationStorePort>,
    observations: Arc<dyn ObservationStorePort>,
    feedback: Arc<dyn FeedbackStorePort>,
    geocoder: Arc<dyn GeocodePort>,
    geocode_timeout: Duration,
}

impl fmt::Debug for QueryService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryService")
            .field("geocode_timeout", &self.geocode_timeout)
            .finish_non_exhaustive()
    }
}

impl QueryService {
    #[must_use]
    pub fn new(
        locations: Arc<dyn LocationStorePort>,
        observations: Arc<dyn ObservationStorePort>,
        feedback: Arc<dyn FeedbackStorePort>,
        geocoder: Arc<dyn GeocodePort>,
        geocode_timeout: Duration,
    ) -> Self {
        Self {
            locations,
            observations,
            feedback,
            geocoder,
            geocode_timeout,
        }
    }

    /// Observations whose city name contains `fragment`; empty matches all
    #[instrument(skip(self))]
    pub async fn search_by_city_fragment(
        &self,
        fragment: &str,
    ) -> Result<Vec<ObservationView>, ApplicationError> {
        let views = self.observations.search(fragment).await?;
        debug!(count = views.len(), "Search complete");
        Ok(views)
    }

    /// Every stored observation
    #[instrument(skip(self))]
    pub async fn all_observations(&self) -> Result<Vec<ObservationView>, ApplicationError> {
        self.observations.list_all().await
    }

    /// Coordinates for an exact city name
    ///
    /// Stored locations answer first. On a miss the provider is asked live;
    /// that answer is not persisted. `None` covers unknown cities as well as
    /// provider failures and timeouts.
    #[instrument(skip(self))]
    pub async fn coordinates_for(
        &self,
        name: &str,
    ) -> Result<Option<CoordinateLookup>, ApplicationError> {
        if let Some(location) = self.locations.find_by_name(name).await? {
            return Ok(Some(CoordinateLookup {
                coordinates: location.coordinates(),
                source: CoordinateSource::Database,
            }));
        }

        Ok(
            lookup_or_none(self.geocoder.as_ref(), name, self.geocode_timeout)
                .await
                .map(|found| CoordinateLookup {
                    coordinates: found.location,
                    source: CoordinateSource::Provider,
                }),
        )
    }

    /// Like/dislike counts; zero when nothing has been submitted
    #[instrument(skip(self))]
    pub async fn feedback_totals(&self) -> Result<FeedbackTotals, ApplicationError> {
        self.feedback.totals().await
    }
}
