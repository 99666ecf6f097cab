//! Domain entities - Objects with identity and lifecycle

mod feedback;
mod location;
mod observation;

pub use feedback::{FeedbackEntry, FeedbackTotals};
pub use location::Location;
pub use observation::{Observation, WeatherReading};
