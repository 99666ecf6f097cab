//! Weather ingestion
//!
//! Resolves the location through [`LocationResolver`] and appends one
//! observation. A location created by the resolver stays persisted even if
//! the append fails afterwards.

use std::{fmt, sync::Arc};

use domain::{
    entities::{Observation, WeatherReading},
    value_objects::ObservationId,
};
use tracing::{info, instrument};

use super::LocationResolver;
use crate::{error::ApplicationError, ports::ObservationStorePort};

/// Server-side defaults for fields the caller may omit
#[derive(Debug, Clone)]
pub struct IngestionServiceConfig {
    /// Condition recorded when absent (default: "Clear")
    pub default_condition: String,
    /// Wind speed recorded when absent (default: 5)
    pub default_wind_speed: f64,
}

impl Default for IngestionServiceConfig {
    fn default() -> Self {
        Self {
            default_condition: Observation::DEFAULT_CONDITION.to_string(),
            default_wind_speed: Observation::DEFAULT_WIND_SPEED,
        }
    }
}

/// Accepts weather observations for named cities
#[derive(Clone)]
pub struct IngestionService {
    resolver: LocationResolver,
    observations: Arc<dyn ObservationStorePort>,
    config: IngestionServiceConfig,
}

impl fmt::Debug for IngestionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionService")
            .field("resolver", &self.resolver)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl IngestionService {
    #[must_use]
    pub fn new(
        resolver: LocationResolver,
        observations: Arc<dyn ObservationStorePort>,
        config: IngestionServiceConfig,
    ) -> Self {
        Self {
            resolver,
            observations,
            config,
        }
    }

    /// Ingest a reading with only temperature and humidity supplied
    pub async fn ingest(
        &self,
        name: &str,
        temperature: f64,
        humidity: f64,
    ) -> Result<ObservationId, ApplicationError> {
        self.ingest_reading(name, WeatherReading::new(temperature, humidity))
            .await
    }

    /// Ingest a full reading; missing optional fields take configured defaults
    #[instrument(skip(self, reading), fields(temperature = reading.temperature, humidity = reading.humidity))]
    pub async fn ingest_reading(
        &self,
        name: &str,
        mut reading: WeatherReading,
    ) -> Result<ObservationId, ApplicationError> {
        let location_id = self.resolver.resolve(name).await?;

        reading
            .condition
            .get_or_insert_with(|| self.config.default_condition.clone());
        reading
            .wind_speed
            .get_or_insert(self.config.default_wind_speed);

        let observation = Observation::record(location_id, reading);
        self.observations.append(&observation).await?;

        info!(observation_id = %observation.id, %location_id, "Observation recorded");
        Ok(observation.id)
    }
}
