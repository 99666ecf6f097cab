//! Feedback store port

use async_trait::async_trait;
use domain::entities::{FeedbackEntry, FeedbackTotals};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the append-only feedback log
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FeedbackStorePort: Send + Sync {
    /// Append a feedback entry
    async fn append(&self, entry: &FeedbackEntry) -> Result<(), ApplicationError>;

    /// Count entries by their `liked` value; an empty log yields zeros
    async fn totals(&self) -> Result<FeedbackTotals, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn FeedbackStorePort>();
    }
}
