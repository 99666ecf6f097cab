//! SQLite observation store
//!
//! Implements `ObservationStorePort`. Reads join each observation to its
//! location name. The city fragment is always bound as a parameter and
//! escaped, so `%` and `_` typed by a caller match themselves. Both sides are
//! folded with the connection's `casefold` function, so "zü" finds "Zürich".

use std::sync::Arc;

use application::{
    error::ApplicationError,
    ports::{ObservationStorePort, ObservationView},
};
use async_trait::async_trait;
use domain::Observation;
use rusqlite::{Connection, Row, ToSql, params};
use tokio::task;
use tracing::{debug, instrument};

use super::{
    connection::ConnectionPool,
    error::{map_join_error, map_pool_error, map_sqlite_error},
    sql::{escape_like, format_timestamp, parse_timestamp},
};

const VIEW_SELECT: &str = "SELECT l.name, o.temperature, o.humidity, o.condition, o.wind_speed, o.observed_at
     FROM observations o
     JOIN locations l ON l.id = o.location_id";

const VIEW_ORDER: &str = "ORDER BY o.observed_at, o.id";

/// SQLite-based observation store
#[derive(Debug, Clone)]
pub struct SqliteObservationStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteObservationStore {
    /// Create a new SQLite observation store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    async fn query_views(
        &self,
        filter: &'static str,
        fragment: Option<String>,
    ) -> Result<Vec<ObservationView>, ApplicationError> {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(map_pool_error)?;
            let sql = format!("{VIEW_SELECT} {filter} {VIEW_ORDER}");
            let params: Vec<&dyn ToSql> = fragment.iter().map(|f| f as &dyn ToSql).collect();
            let views = collect_views(&conn, &sql, &params)?;
            debug!(count = views.len(), "Loaded observations");
            Ok(views)
        })
        .await
        .map_err(map_join_error)?
    }
}

#[async_trait]
impl ObservationStorePort for SqliteObservationStore {
    #[instrument(skip(self, observation), fields(observation_id = %observation.id, location_id = %observation.location_id))]
    async fn append(&self, observation: &Observation) -> Result<(), ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let observation = observation.clone();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(map_pool_error)?;

            conn.execute(
                "INSERT INTO observations (id, location_id, temperature, humidity, condition, wind_speed, observed_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    observation.id.to_string(),
                    observation.location_id.to_string(),
                    observation.temperature,
                    observation.humidity,
                    observation.condition,
                    observation.wind_speed,
                    format_timestamp(observation.observed_at),
                ],
            )
            .map_err(map_sqlite_error)?;

            debug!("Appended observation");
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    #[instrument(skip(self))]
    async fn search(&self, fragment: &str) -> Result<Vec<ObservationView>, ApplicationError> {
        if fragment.is_empty() {
            return self.list_all().await;
        }
        self.query_views(
            "WHERE casefold(l.name) LIKE '%' || ?1 || '%' ESCAPE '\\'",
            Some(escape_like(&fragment.to_lowercase())),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<ObservationView>, ApplicationError> {
        self.query_views("", None).await
    }
}

fn collect_views(
    conn: &Connection,
    sql: &str,
    params: &[&dyn ToSql],
) -> Result<Vec<ObservationView>, ApplicationError> {
    let mut stmt = conn.prepare(sql).map_err(map_sqlite_error)?;
    stmt.query_map(params, row_to_view)
        .map_err(map_sqlite_error)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(map_sqlite_error)
}

/// Convert a joined row to an `ObservationView`
fn row_to_view(row: &Row<'_>) -> rusqlite::Result<ObservationView> {
    let observed_at: String = row.get(5)?;

    Ok(ObservationView {
        city: row.get(0)?,
        temperature: row.get(1)?,
        humidity: row.get(2)?,
        condition: row.get(3)?,
        wind_speed: row.get(4)?,
        observed_at: parse_timestamp(5, &observed_at)?,
    })
}

#[cfg(test)]
mod tests {
    use application::ports::LocationStorePort;
    use domain::{GeoLocation, Location, LocationId, UserId, WeatherReading};

    use super::*;
    use crate::{
        config::DatabaseConfig,
        persistence::{SqliteLocationStore, connection::create_pool},
    };

    struct Stores {
        locations: SqliteLocationStore,
        observations: SqliteObservationStore,
    }

    fn create_test_stores() -> Stores {
        let pool = Arc::new(create_pool(&DatabaseConfig::in_memory()).unwrap());
        Stores {
            locations: SqliteLocationStore::new(Arc::clone(&pool)),
            observations: SqliteObservationStore::new(pool),
        }
    }

    impl Stores {
        async fn record(&self, city: &str, temperature: f64) -> LocationId {
            let location_id = match self.locations.find_by_name(city).await.unwrap() {
                Some(existing) => existing.id(),
                None => {
                    let location =
                        Location::new(city, "USA", GeoLocation::sentinel(), UserId::system());
                    self.locations.insert(&location).await.unwrap();
                    location.id()
                },
            };
            let observation =
                Observation::record(location_id, WeatherReading::new(temperature, 40.0));
            self.observations.append(&observation).await.unwrap();
            location_id
        }
    }

    #[tokio::test]
    async fn append_and_list() {
        let stores = create_test_stores();
        stores.record("Columbus", 70.0).await;

        let views = stores.observations.list_all().await.unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].city, "Columbus");
        assert!((views[0].temperature - 70.0).abs() < f64::EPSILON);
        assert_eq!(views[0].condition, "Clear");
        assert!((views[0].wind_speed - 5.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn append_requires_existing_location() {
        let stores = create_test_stores();
        let orphan = Observation::record(LocationId::new(), WeatherReading::new(1.0, 1.0));

        let err = stores.observations.append(&orphan).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Storage(_)));
    }

    #[tokio::test]
    async fn search_is_case_insensitive_substring() {
        let stores = create_test_stores();
        stores.record("Columbus", 70.0).await;
        stores.record("Cleveland", 60.0).await;
        stores.record("Cincinnati", 65.0).await;

        let hits = stores.observations.search("LUM").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].city, "Columbus");

        let hits = stores.observations.search("c").await.unwrap();
        assert_eq!(hits.len(), 3);
    }

    #[tokio::test]
    async fn search_folds_non_ascii_case() {
        let stores = create_test_stores();
        stores.record("Zürich", 12.0).await;
        stores.record("ÅLESUND", 8.0).await;
        stores.record("Zug", 11.0).await;

        let hits = stores.observations.search("zÜ").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].city, "Zürich");

        let hits = stores.observations.search("ålesund").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].city, "ÅLESUND");
    }

    #[tokio::test]
    async fn empty_fragment_returns_everything() {
        let stores = create_test_stores();
        stores.record("Columbus", 70.0).await;
        stores.record("Columbus", 71.0).await;
        stores.record("Dayton", 68.0).await;

        let all = stores.observations.search("").await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all, stores.observations.list_all().await.unwrap());
    }

    #[tokio::test]
    async fn wildcards_are_matched_literally() {
        let stores = create_test_stores();
        stores.record("Columbus", 70.0).await;
        stores.record("100% Town", 50.0).await;
        stores.record("Under_score", 50.0).await;

        let hits = stores.observations.search("%").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].city, "100% Town");

        let hits = stores.observations.search("_").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].city, "Under_score");
    }

    #[tokio::test]
    async fn injection_attempt_matches_nothing() {
        let stores = create_test_stores();
        stores.record("Columbus", 70.0).await;

        let hits = stores
            .observations
            .search("' OR '1'='1")
            .await
            .unwrap();
        assert!(hits.is_empty());
        assert_eq!(stores.observations.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn results_are_ordered_by_observation_time() {
        let stores = create_test_stores();
        for t in [1.0, 2.0, 3.0, 4.0] {
            stores.record("Columbus", t).await;
        }

        let views = stores.observations.list_all().await.unwrap();
        assert!(views.windows(2).all(|w| w[0].observed_at <= w[1].observed_at));
    }
}
