//! Application services - Use case implementations

mod feedback_service;
mod geocode_lookup;
mod ingestion_service;
mod location_resolver;
mod query_service;
#[cfg(test)]
mod test_support;

pub use feedback_service::FeedbackService;
pub use ingestion_service::{IngestionService, IngestionServiceConfig};
pub use location_resolver::{LocationResolver, LocationResolverConfig};
pub use query_service::{CoordinateLookup, CoordinateSource, QueryService};
