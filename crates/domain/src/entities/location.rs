//! Location entity
//!
//! A named place with resolved (or placeholder) coordinates. Locations are
//! created once per distinct name and never updated in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{GeoLocation, LocationId, UserId};

/// A stored, named location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    id: LocationId,
    /// Exact city name as first submitted (matched case-sensitively)
    name: String,
    country: String,
    coordinates: GeoLocation,
    owner_id: UserId,
    created_at: DateTime<Utc>,
}

impl Location {
    /// Country stored when the geocoding provider does not report one
    pub const DEFAULT_COUNTRY: &'static str = "USA";

    /// Create a new location with a fresh ID
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        country: impl Into<String>,
        coordinates: GeoLocation,
        owner_id: UserId,
    ) -> Self {
        Self {
            id: LocationId::new(),
            name: name.into(),
            country: country.into(),
            coordinates,
            owner_id,
            created_at: Utc::now(),
        }
    }

    /// Restore a location from storage
    #[must_use]
    pub const fn restore(
        id: LocationId,
        name: String,
        country: String,
        coordinates: GeoLocation,
        owner_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            country,
            coordinates,
            owner_id,
            created_at,
        }
    }

    #[must_use]
    pub const fn id(&self) -> LocationId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }

    #[must_use]
    pub const fn coordinates(&self) -> GeoLocation {
        self.coordinates
    }

    #[must_use]
    pub const fn owner_id(&self) -> UserId {
        self.owner_id
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether the location was stored without real coordinates
    #[must_use]
    pub fn has_placeholder_coordinates(&self) -> bool {
        self.coordinates.is_sentinel()
    }
}
