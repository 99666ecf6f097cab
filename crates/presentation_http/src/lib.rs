//! SkyView HTTP presentation layer
//!
//! JSON API over the ingestion, query and feedback services.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use error::{ApiError, IngestError, set_expose_internal_errors};
pub use middleware::{ApiJson, ApiQuery, ValidatedJson, ValidationError};
pub use routes::create_router;
pub use state::AppState;
