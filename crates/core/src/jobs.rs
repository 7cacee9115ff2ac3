//! Deferred write jobs handed from HTTP producers to the worker pools.
//!
//! A job is built once by its constructor, moved into a pool's queue and
//! finally consumed by exactly one worker. Nothing mutates it in between.

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// Record that `user_id` viewed `cartoon_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewJob {
    pub user_id: DbId,
    pub cartoon_id: DbId,
    /// When the producer accepted the view. Used for queue-latency logging
    /// and as the stored `viewed_at`.
    pub enqueued_at: Timestamp,
}

impl ViewJob {
    pub fn new(user_id: DbId, cartoon_id: DbId) -> Self {
        Self {
            user_id,
            cartoon_id,
            enqueued_at: Utc::now(),
        }
    }
}

/// Direction of a favourite toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FavouriteAction {
    Add,
    Remove,
}

impl FavouriteAction {
    pub fn as_str(self) -> &'static str {
        match self {
            FavouriteAction::Add => "add",
            FavouriteAction::Remove => "remove",
        }
    }
}

impl fmt::Display for FavouriteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Add or remove the (`user_id`, `cartoon_id`) favourite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavouriteJob {
    pub user_id: DbId,
    pub cartoon_id: DbId,
    pub action: FavouriteAction,
    pub enqueued_at: Timestamp,
}

impl FavouriteJob {
    pub fn new(user_id: DbId, cartoon_id: DbId, action: FavouriteAction) -> Self {
        Self {
            user_id,
            cartoon_id,
            action,
            enqueued_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn favourite_action_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&FavouriteAction::Remove).unwrap(),
            "\"remove\""
        );
        let parsed: FavouriteAction = serde_json::from_str("\"add\"").unwrap();
        assert_eq!(parsed, FavouriteAction::Add);
        assert_eq!(FavouriteAction::Add.to_string(), "add");
    }

    #[test]
    fn new_jobs_are_stamped() {
        let before = Utc::now();
        let job = FavouriteJob::new(7, 11, FavouriteAction::Add);
        assert_eq!(job.user_id, 7);
        assert_eq!(job.cartoon_id, 11);
        assert!(job.enqueued_at >= before);

        let view = ViewJob::new(7, 11);
        assert!(view.enqueued_at >= before);
    }
}
