//! Weather observation entity
//!
//! Observations are append-only: created once by ingestion, never updated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{LocationId, ObservationId};

/// Caller-supplied values for a new observation
///
/// Only temperature and humidity are required; the remaining fields fall back
/// to [`Observation::DEFAULT_CONDITION`] and [`Observation::DEFAULT_WIND_SPEED`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeatherReading {
    pub temperature: f64,
    pub humidity: f64,
    pub condition: Option<String>,
    pub wind_speed: Option<f64>,
}

impl WeatherReading {
    /// Reading with only the required fields
    #[must_use]
    pub const fn new(temperature: f64, humidity: f64) -> Self {
        Self {
            temperature,
            humidity,
            condition: None,
            wind_speed: None,
        }
    }

    #[must_use]
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    #[must_use]
    pub const fn with_wind_speed(mut self, wind_speed: f64) -> Self {
        self.wind_speed = Some(wind_speed);
        self
    }
}

/// A single weather reading tied to a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub id: ObservationId,
    pub location_id: LocationId,
    pub temperature: f64,
    pub humidity: f64,
    pub condition: String,
    pub wind_speed: f64,
    /// Server-assigned timestamp
    pub observed_at: DateTime<Utc>,
}

impl Observation {
    /// Condition recorded when the caller does not supply one
    pub const DEFAULT_CONDITION: &'static str = "Clear";

    /// Wind speed recorded when the caller does not supply one
    pub const DEFAULT_WIND_SPEED: f64 = 5.0;

    /// Record a reading against a resolved location, filling defaults
    #[must_use]
    pub fn record(location_id: LocationId, reading: WeatherReading) -> Self {
        Self {
            id: ObservationId::new(),
            location_id,
            temperature: reading.temperature,
            humidity: reading.humidity,
            condition: reading
                .condition
                .unwrap_or_else(|| Self::DEFAULT_CONDITION.to_string()),
            wind_speed: reading.wind_speed.unwrap_or(Self::DEFAULT_WIND_SPEED),
            observed_at: Utc::now(),
        }
    }
}
