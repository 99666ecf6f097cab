//! Feedback submission

use std::{fmt, sync::Arc};

use domain::{entities::FeedbackEntry, value_objects::FeedbackId};
use tracing::{debug, instrument};

use crate::{error::ApplicationError, ports::FeedbackStorePort};

/// Records like/dislike votes
#[derive(Clone)]
pub struct FeedbackService {
    store: Arc<dyn FeedbackStorePort>,
}

impl fmt::Debug for FeedbackService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedbackService").finish_non_exhaustive()
    }
}

impl FeedbackService {
    #[must_use]
    pub fn new(store: Arc<dyn FeedbackStorePort>) -> Self {
        Self { store }
    }

    /// Append a vote; a missing or blank username is stored as "anonymous"
    #[instrument(skip(self))]
    pub async fn submit(
        &self,
        username: Option<&str>,
        liked: bool,
    ) -> Result<FeedbackId, ApplicationError> {
        let entry = FeedbackEntry::new(username, liked);
        self.store.append(&entry).await?;
        debug!(feedback_id = %entry.id, "Feedback recorded");
        Ok(entry.id)
    }
}
