//! Application layer - Use cases and orchestration
//!
//! Location resolution, weather ingestion, queries and feedback. Storage and
//! geocoding are reached only through the ports defined here; adapters in the
//! infrastructure layer implement them.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
