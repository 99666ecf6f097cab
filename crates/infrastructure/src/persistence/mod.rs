//! Persistence module
//!
//! SQLite-backed storage for locations, observations and feedback.

pub mod connection;
mod database_health;
mod error;
mod feedback_store;
mod location_store;
pub mod migrations;
mod observation_store;
mod sql;

pub use connection::{ConnectionPool, DatabaseError, create_pool};
pub use database_health::SqliteDatabaseHealth;
pub use feedback_store::SqliteFeedbackStore;
pub use location_store::SqliteLocationStore;
pub use observation_store::SqliteObservationStore;
pub use sql::escape_like;
