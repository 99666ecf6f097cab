//! Geocoding port
//!
//! Resolves a city name to coordinates through an external provider.

use async_trait::async_trait;
use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Best candidate returned by a geocoding provider
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeMatch {
    pub location: GeoLocation,
    /// Country code reported by the provider, if any
    pub country: Option<String>,
    /// Canonical name reported by the provider, if any
    pub name: Option<String>,
}

impl GeocodeMatch {
    #[must_use]
    pub const fn new(location: GeoLocation) -> Self {
        Self {
            location,
            country: None,
            name: None,
        }
    }

    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Port for geocoding lookups
///
/// Only the first candidate is ever returned. `Ok(None)` means the provider
/// does not know the name; transport and payload failures come back as
/// errors so callers can log them, even though they treat both the same.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodePort: Send + Sync {
    /// Look up coordinates for a city name
    async fn lookup(&self, name: &str) -> Result<Option<GeocodeMatch>, ApplicationError>;
}
