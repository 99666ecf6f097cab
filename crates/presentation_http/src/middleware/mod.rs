//! HTTP middleware components
//!
//! Request extractors, validation, and the CORS layer built from server
//! configuration.

pub mod cors;
pub mod extract;
pub mod validation;

pub use cors::cors_layer;
pub use extract::{ApiJson, ApiQuery};
pub use validation::{ValidatedJson, ValidationError};
