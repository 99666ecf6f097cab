//! SQLite readiness probe
//!
//! Implements `DatabaseHealthPort` by checking out a pooled connection and
//! running `SELECT 1`.

use std::{sync::Arc, time::Instant};

use application::{
    error::ApplicationError,
    ports::{DatabaseHealth, DatabaseHealthPort},
};
use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use super::{
    ConnectionPool,
    error::{map_join_error, map_pool_error, map_sqlite_error},
};

/// SQLite database health adapter
pub struct SqliteDatabaseHealth {
    pool: Arc<ConnectionPool>,
}

impl std::fmt::Debug for SqliteDatabaseHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteDatabaseHealth")
            .field("connections", &self.pool.state().connections)
            .finish()
    }
}

impl SqliteDatabaseHealth {
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DatabaseHealthPort for SqliteDatabaseHealth {
    async fn is_available(&self) -> bool {
        match self.check_health().await {
            Ok(health) => health.reachable,
            Err(e) => {
                warn!(error = %e, "Database is not available");
                false
            },
        }
    }

    #[instrument(skip(self))]
    async fn check_health(&self) -> Result<DatabaseHealth, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let start = Instant::now();

        let (version, connections) = tokio::task::spawn_blocking(move || {
            let conn = pool.get().map_err(map_pool_error)?;

            conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
                .map_err(map_sqlite_error)?;
            let version: String = conn
                .query_row("SELECT sqlite_version()", [], |row| row.get(0))
                .map_err(map_sqlite_error)?;

            Ok::<_, ApplicationError>((version, pool.state().connections))
        })
        .await
        .map_err(map_join_error)??;

        let response_time_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        debug!(%version, connections, response_time_ms, "Database health check passed");

        Ok(DatabaseHealth::reachable()
            .with_version(format!("SQLite {version}"))
            .with_pool_size(connections)
            .with_response_time(response_time_ms))
    }
}
