//! Location store port
//!
//! Persistent mapping from exact city name to location record.

use async_trait::async_trait;
use domain::entities::Location;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for location persistence
///
/// Implementations must enforce uniqueness of [`Location::name`]. Names are
/// compared byte-for-byte: no case folding, no trimming.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LocationStorePort: Send + Sync {
    /// Find a location by its exact name
    async fn find_by_name(&self, name: &str) -> Result<Option<Location>, ApplicationError>;

    /// Insert a new location
    ///
    /// Returns [`ApplicationError::Conflict`] when a location with the same
    /// name already exists.
    async fn insert(&self, location: &Location) -> Result<(), ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn LocationStorePort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn LocationStorePort>();
    }
}
