//! Repository for the `favourites` table.

use sqlx::PgPool;
use toonshelf_core::types::DbId;

use crate::models::favourite::{Favourite, FavouriteWithCartoon};

/// Column list for `favourites` queries.
const COLUMNS: &str = "id, user_id, cartoon_id, created_at";

/// Name of the (user_id, cartoon_id) unique constraint.
pub const UNIQUE_CONSTRAINT: &str = "uq_favourites_user_cartoon";

/// Favourite inserts, lookups and transactional removal.
pub struct FavouriteRepo;

impl FavouriteRepo {
    /// Insert a favourite row.
    ///
    /// Relies on `uq_favourites_user_cartoon`: a second insert for the same
    /// pair fails with SQLSTATE 23505 instead of creating a duplicate.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        cartoon_id: DbId,
    ) -> Result<Favourite, sqlx::Error> {
        let query = format!(
            "INSERT INTO favourites (user_id, cartoon_id) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Favourite>(&query)
            .bind(user_id)
            .bind(cartoon_id)
            .fetch_one(pool)
            .await
    }

    /// Find the favourite for a (user, cartoon) pair.
    pub async fn find(
        pool: &PgPool,
        user_id: DbId,
        cartoon_id: DbId,
    ) -> Result<Option<Favourite>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM favourites WHERE user_id = $1 AND cartoon_id = $2");
        sqlx::query_as::<_, Favourite>(&query)
            .bind(user_id)
            .bind(cartoon_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's favourites with cartoon titles, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<FavouriteWithCartoon>, sqlx::Error> {
        sqlx::query_as::<_, FavouriteWithCartoon>(
            "SELECT f.id, f.cartoon_id, c.title, c.poster_url, f.created_at \
             FROM favourites f \
             JOIN cartoons c ON c.id = f.cartoon_id \
             WHERE f.user_id = $1 \
             ORDER BY f.created_at DESC, f.id DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Count rows for a pair. At most 1 while the unique constraint holds.
    pub async fn count_for_pair(
        pool: &PgPool,
        user_id: DbId,
        cartoon_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM favourites WHERE user_id = $1 AND cartoon_id = $2",
        )
        .bind(user_id)
        .bind(cartoon_id)
        .fetch_one(pool)
        .await
    }

    /// Look up and delete the pair's row in one transaction.
    ///
    /// The row is locked with `FOR UPDATE` so a concurrent remove for the same
    /// pair waits instead of double-deleting. Returns `false` (after rolling
    /// back) when no row exists.
    pub async fn remove(pool: &PgPool, user_id: DbId, cartoon_id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let existing = sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM favourites WHERE user_id = $1 AND cartoon_id = $2 FOR UPDATE",
        )
        .bind(user_id)
        .bind(cartoon_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(id) = existing else {
            tx.rollback().await?;
            return Ok(false);
        };

        sqlx::query("DELETE FROM favourites WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }
}
