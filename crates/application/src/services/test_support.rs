//! In-memory port implementations for service tests

use std::sync::Arc;

use async_trait::async_trait;
use domain::entities::{FeedbackEntry, FeedbackTotals, Location, Observation};
use parking_lot::Mutex;

use crate::{
    error::ApplicationError,
    ports::{FeedbackStorePort, LocationStorePort, ObservationStorePort, ObservationView},
};

#[derive(Debug, Default)]
pub struct InMemoryLocationStore {
    pub rows: Mutex<Vec<Location>>,
}

impl InMemoryLocationStore {
    pub fn count_named(&self, name: &str) -> usize {
        self.rows.lock().iter().filter(|l| l.name() == name).count()
    }
}

#[async_trait]
impl LocationStorePort for InMemoryLocationStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<Location>, ApplicationError> {
        Ok(self.rows.lock().iter().find(|l| l.name() == name).cloned())
    }

    async fn insert(&self, location: &Location) -> Result<(), ApplicationError> {
        let mut rows = self.rows.lock();
        if rows.iter().any(|l| l.name() == location.name()) {
            return Err(ApplicationError::Conflict(format!(
                "location '{}' already exists",
                location.name()
            )));
        }
        rows.push(location.clone());
        Ok(())
    }
}

#[derive(Debug)]
pub struct InMemoryObservationStore {
    pub locations: Arc<InMemoryLocationStore>,
    pub rows: Mutex<Vec<Observation>>,
}

impl InMemoryObservationStore {
    pub fn new(locations: Arc<InMemoryLocationStore>) -> Self {
        Self {
            locations,
            rows: Mutex::new(Vec::new()),
        }
    }

    fn views(&self) -> Vec<ObservationView> {
        let locations = self.locations.rows.lock();
        self.rows
            .lock()
            .iter()
            .filter_map(|obs| {
                let location = locations.iter().find(|l| l.id() == obs.location_id)?;
                Some(ObservationView {
                    city: location.name().to_string(),
                    temperature: obs.temperature,
                    humidity: obs.humidity,
                    condition: obs.condition.clone(),
                    wind_speed: obs.wind_speed,
                    observed_at: obs.observed_at,
                })
            })
            .collect()
    }
}

#[async_trait]
impl ObservationStorePort for InMemoryObservationStore {
    async fn append(&self, observation: &Observation) -> Result<(), ApplicationError> {
        self.rows.lock().push(observation.clone());
        Ok(())
    }

    async fn search(&self, fragment: &str) -> Result<Vec<ObservationView>, ApplicationError> {
        let needle = fragment.to_lowercase();
        Ok(self
            .views()
            .into_iter()
            .filter(|v| v.city.to_lowercase().contains(&needle))
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<ObservationView>, ApplicationError> {
        Ok(self.views())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryFeedbackStore {
    pub rows: Mutex<Vec<FeedbackEntry>>,
}

#[async_trait]
impl FeedbackStorePort for InMemoryFeedbackStore {
    async fn append(&self, entry: &FeedbackEntry) -> Result<(), ApplicationError> {
        self.rows.lock().push(entry.clone());
        Ok(())
    }

    async fn totals(&self) -> Result<FeedbackTotals, ApplicationError> {
        Ok(FeedbackTotals::tally(self.rows.lock().iter().map(|e| e.liked)))
    }
}
