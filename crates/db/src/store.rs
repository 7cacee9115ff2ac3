//! Postgres implementation of the worker-facing store traits.

use async_trait::async_trait;
use toonshelf_core::error::StoreError;
use toonshelf_core::store::{FavouriteStore, ViewStore};
use toonshelf_core::types::{DbId, Timestamp};

use crate::repositories::{FavouriteRepo, ViewRepo};
use crate::DbPool;

/// PostgreSQL unique constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

/// Write target for the view and favourite worker pools.
#[derive(Clone)]
pub struct PgActivityStore {
    pool: DbPool,
}

impl PgActivityStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ViewStore for PgActivityStore {
    async fn insert_view(
        &self,
        cartoon_id: DbId,
        user_id: DbId,
        viewed_at: Timestamp,
    ) -> Result<(), StoreError> {
        ViewRepo::create(&self.pool, cartoon_id, Some(user_id), viewed_at)
            .await
            .map_err(classify_store_error)?;
        Ok(())
    }
}

#[async_trait]
impl FavouriteStore for PgActivityStore {
    async fn insert_favourite(&self, user_id: DbId, cartoon_id: DbId) -> Result<(), StoreError> {
        FavouriteRepo::create(&self.pool, user_id, cartoon_id)
            .await
            .map_err(classify_store_error)?;
        Ok(())
    }

    async fn remove_favourite(
        &self,
        user_id: DbId,
        cartoon_id: DbId,
    ) -> Result<bool, StoreError> {
        FavouriteRepo::remove(&self.pool, user_id, cartoon_id)
            .await
            .map_err(classify_store_error)
    }
}

/// Map a sqlx error onto the driver-agnostic [`StoreError`].
///
/// Only SQLSTATE 23505 becomes [`StoreError::UniqueViolation`]; everything
/// else (connectivity, foreign keys, serialization failures) is a backend
/// error.
pub fn classify_store_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return StoreError::UniqueViolation {
                constraint: db_err.constraint().unwrap_or("unknown").to_string(),
            };
        }
    }
    StoreError::Backend(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_are_backend_errors() {
        let err = classify_store_error(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, StoreError::Backend(_)));

        let err = classify_store_error(sqlx::Error::RowNotFound);
        assert!(!err.is_unique_violation());
    }
}
