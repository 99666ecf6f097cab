//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod database_health_port;
mod feedback_store;
mod geocode_port;
mod location_store;
mod observation_store;

#[cfg(test)]
pub use database_health_port::MockDatabaseHealthPort;
pub use database_health_port::{DatabaseHealth, DatabaseHealthPort};
pub use feedback_store::FeedbackStorePort;
#[cfg(test)]
pub use feedback_store::MockFeedbackStorePort;
#[cfg(test)]
pub use geocode_port::MockGeocodePort;
pub use geocode_port::{GeocodeMatch, GeocodePort};
pub use location_store::LocationStorePort;
#[cfg(test)]
pub use location_store::MockLocationStorePort;
#[cfg(test)]
pub use observation_store::MockObservationStorePort;
pub use observation_store::{ObservationStorePort, ObservationView};
