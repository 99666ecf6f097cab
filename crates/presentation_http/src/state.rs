//! Application state shared across handlers

use std::sync::Arc;

use application::{FeedbackService, IngestionService, QueryService, ports::DatabaseHealthPort};
use infrastructure::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Write side: location resolution plus observation append
    pub ingestion: Arc<IngestionService>,
    /// Read side: search, coordinates, feedback totals
    pub query: Arc<QueryService>,
    pub feedback: Arc<FeedbackService>,
    /// Storage probe used by `/ready`
    pub database_health: Arc<dyn DatabaseHealthPort>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("ingestion", &self.ingestion)
            .field("query", &self.query)
            .field("feedback", &self.feedback)
            .field("environment", &self.config.environment)
            .finish_non_exhaustive()
    }
}
