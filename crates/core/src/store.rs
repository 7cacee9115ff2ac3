//! Persistent-store capabilities the worker pools write through.
//!
//! Implemented against Postgres in `toonshelf-db`; tests substitute an
//! in-memory store with the same uniqueness and atomicity guarantees.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::types::{DbId, Timestamp};

/// Append-only sink for view analytics.
#[async_trait]
pub trait ViewStore: Send + Sync {
    /// Insert one view row. Callers have already checked that the cartoon
    /// exists.
    async fn insert_view(
        &self,
        cartoon_id: DbId,
        user_id: DbId,
        viewed_at: Timestamp,
    ) -> Result<(), StoreError>;
}

/// Favourite rows with a uniqueness guarantee on (user, cartoon).
#[async_trait]
pub trait FavouriteStore: Send + Sync {
    /// Insert a favourite row.
    ///
    /// Must report an existing (user, cartoon) row as
    /// [`StoreError::UniqueViolation`] rather than inserting a duplicate.
    async fn insert_favourite(&self, user_id: DbId, cartoon_id: DbId) -> Result<(), StoreError>;

    /// Look up and delete the (user, cartoon) row inside one transaction.
    ///
    /// Returns `true` if a row was deleted, `false` if none existed.
    async fn remove_favourite(&self, user_id: DbId, cartoon_id: DbId)
        -> Result<bool, StoreError>;
}
