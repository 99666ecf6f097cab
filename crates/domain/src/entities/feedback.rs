//! App feedback entries and their aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::FeedbackId;

/// A single like/dislike vote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub id: FeedbackId,
    pub username: String,
    pub liked: bool,
    pub created_at: DateTime<Utc>,
}

impl FeedbackEntry {
    /// Username recorded for votes submitted without one
    pub const ANONYMOUS: &'static str = "anonymous";

    /// Create a new entry, falling back to [`Self::ANONYMOUS`] for a missing or blank username
    #[must_use]
    pub fn new(username: Option<&str>, liked: bool) -> Self {
        let username = username
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(Self::ANONYMOUS);

        Self {
            id: FeedbackId::new(),
            username: username.to_string(),
            liked,
            created_at: Utc::now(),
        }
    }
}

/// Like/dislike counts across all feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeedbackTotals {
    pub liked: u64,
    pub disliked: u64,
}

impl FeedbackTotals {
    #[must_use]
    pub const fn new(liked: u64, disliked: u64) -> Self {
        Self { liked, disliked }
    }

    /// Tally a sequence of votes
    #[must_use]
    pub fn tally<I>(votes: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        votes.into_iter().fold(Self::default(), |mut totals, liked| {
            if liked {
                totals.liked += 1;
            } else {
                totals.disliked += 1;
            }
            totals
        })
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.liked + self.disliked
    }
}
