//! SQLite location store
//!
//! Implements `LocationStorePort`. The `UNIQUE` constraint on
//! `locations.name` is what makes concurrent first-sight resolution safe: a
//! losing insert surfaces as `ApplicationError::Conflict`.

use std::sync::Arc;

use application::{error::ApplicationError, ports::LocationStorePort};
use async_trait::async_trait;
use domain::{GeoLocation, Location, LocationId, UserId};
use rusqlite::{OptionalExtension, Row, params};
use tokio::task;
use tracing::{debug, instrument};

use super::{
    connection::ConnectionPool,
    error::{map_join_error, map_pool_error, map_sqlite_error},
    sql::{conversion_error, format_timestamp, parse_timestamp},
};

/// SQLite-based location store
#[derive(Debug, Clone)]
pub struct SqliteLocationStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteLocationStore {
    /// Create a new SQLite location store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocationStorePort for SqliteLocationStore {
    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> Result<Option<Location>, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let name = name.to_string();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(map_pool_error)?;

            conn.query_row(
                "SELECT id, name, country, latitude, longitude, owner_id, created_at
                 FROM locations WHERE name = ?1",
                [&name],
                row_to_location,
            )
            .optional()
            .map_err(map_sqlite_error)
        })
        .await
        .map_err(map_join_error)?
    }

    #[instrument(skip(self, location), fields(location_id = %location.id(), name = %location.name()))]
    async fn insert(&self, location: &Location) -> Result<(), ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let location = location.clone();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(map_pool_error)?;

            conn.execute(
                "INSERT INTO locations (id, name, country, latitude, longitude, owner_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    location.id().to_string(),
                    location.name(),
                    location.country(),
                    location.coordinates().latitude(),
                    location.coordinates().longitude(),
                    location.owner_id().to_string(),
                    format_timestamp(location.created_at()),
                ],
            )
            .map_err(map_sqlite_error)?;

            debug!("Inserted location");
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }
}

/// Convert a database row to a `Location`
fn row_to_location(row: &Row<'_>) -> rusqlite::Result<Location> {
    let id: String = row.get(0)?;
    let name: String = row.get(1)?;
    let country: String = row.get(2)?;
    let latitude: f64 = row.get(3)?;
    let longitude: f64 = row.get(4)?;
    let owner_id: String = row.get(5)?;
    let created_at: String = row.get(6)?;

    Ok(Location::restore(
        LocationId::parse(&id).map_err(|e| conversion_error(0, e))?,
        name,
        country,
        GeoLocation::new(latitude, longitude).map_err(|e| conversion_error(3, e))?,
        UserId::parse(&owner_id).map_err(|e| conversion_error(5, e))?,
        parse_timestamp(6, &created_at)?,
    ))
}
