//! Value Objects - Immutable, identity-less domain primitives

mod feedback_id;
mod geo_location;
mod location_id;
mod observation_id;
mod user_id;

pub use feedback_id::FeedbackId;
pub use geo_location::{GeoLocation, InvalidCoordinates};
pub use location_id::LocationId;
pub use observation_id::ObservationId;
pub use user_id::UserId;
