//! SQLite feedback store

use std::sync::Arc;

use application::{error::ApplicationError, ports::FeedbackStorePort};
use async_trait::async_trait;
use domain::{FeedbackEntry, FeedbackTotals};
use rusqlite::params;
use tokio::task;
use tracing::{debug, instrument};

use super::{
    connection::ConnectionPool,
    error::{map_join_error, map_pool_error, map_sqlite_error},
    sql::format_timestamp,
};

/// SQLite-based append-only feedback log
#[derive(Debug, Clone)]
pub struct SqliteFeedbackStore {
    pool: Arc<ConnectionPool>,
}

impl SqliteFeedbackStore {
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedbackStorePort for SqliteFeedbackStore {
    #[instrument(skip(self, entry), fields(feedback_id = %entry.id, liked = entry.liked))]
    async fn append(&self, entry: &FeedbackEntry) -> Result<(), ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let entry = entry.clone();

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(map_pool_error)?;

            conn.execute(
                "INSERT INTO feedback (id, username, liked, created_at) VALUES (?1, ?2, ?3, ?4)",
                params![
                    entry.id.to_string(),
                    entry.username,
                    entry.liked,
                    format_timestamp(entry.created_at),
                ],
            )
            .map_err(map_sqlite_error)?;

            debug!("Recorded feedback");
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    #[instrument(skip(self))]
    async fn totals(&self) -> Result<FeedbackTotals, ApplicationError> {
        let pool = Arc::clone(&self.pool);

        task::spawn_blocking(move || {
            let conn = pool.get().map_err(map_pool_error)?;

            // SUM over an empty table is NULL; COALESCE keeps both counts numeric.
            let (liked, disliked): (i64, i64) = conn
                .query_row(
                    "SELECT COALESCE(SUM(CASE WHEN liked = 1 THEN 1 ELSE 0 END), 0),
                            COALESCE(SUM(CASE WHEN liked = 0 THEN 1 ELSE 0 END), 0)
                     FROM feedback",
                    [],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )
                .map_err(map_sqlite_error)?;

            Ok(FeedbackTotals::new(
                u64::try_from(liked).unwrap_or_default(),
                u64::try_from(disliked).unwrap_or_default(),
            ))
        })
        .await
        .map_err(map_join_error)?
    }
}
