//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: SQLite stores, the
//! geocoding adapter, and layered application configuration.

pub mod adapters;
pub mod config;
pub mod persistence;

pub use adapters::*;
pub use config::{
    AppConfig, DatabaseConfig, Environment, GeocodingAppConfig, IngestionConfig, ServerConfig,
};
pub use persistence::{
    ConnectionPool, DatabaseError, SqliteDatabaseHealth, SqliteFeedbackStore, SqliteLocationStore,
    SqliteObservationStore, create_pool,
};
