//! Observation store port
//!
//! Append-only log of weather observations, read back joined with their
//! location name.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::entities::Observation;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// An observation joined with the name of its location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationView {
    /// Location name as stored
    pub city: String,
    pub temperature: f64,
    pub humidity: f64,
    pub condition: String,
    pub wind_speed: f64,
    pub observed_at: DateTime<Utc>,
}

/// Port for observation persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ObservationStorePort: Send + Sync {
    /// Append an observation; its location must already exist
    async fn append(&self, observation: &Observation) -> Result<(), ApplicationError>;

    /// All observations whose location name contains `fragment`
    ///
    /// Matching is a case-insensitive substring match with `fragment` taken
    /// literally (wildcard characters have no special meaning). An empty
    /// fragment matches every observation. Results are ordered by
    /// observation time.
    async fn search(&self, fragment: &str) -> Result<Vec<ObservationView>, ApplicationError>;

    /// Every stored observation, ordered by observation time
    async fn list_all(&self) -> Result<Vec<ObservationView>, ApplicationError>;
}
