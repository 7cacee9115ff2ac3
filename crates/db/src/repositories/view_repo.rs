//! Repository for the `views` table.

use sqlx::PgPool;
use toonshelf_core::types::{DbId, Timestamp};

use crate::models::view::View;

/// Column list for `views` queries.
const COLUMNS: &str = "id, cartoon_id, user_id, viewed_at";

/// View inserts and counts.
pub struct ViewRepo;

impl ViewRepo {
    /// Insert one view row, returning it.
    pub async fn create(
        pool: &PgPool,
        cartoon_id: DbId,
        user_id: Option<DbId>,
        viewed_at: Timestamp,
    ) -> Result<View, sqlx::Error> {
        let query = format!(
            "INSERT INTO views (cartoon_id, user_id, viewed_at) VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, View>(&query)
            .bind(cartoon_id)
            .bind(user_id)
            .bind(viewed_at)
            .fetch_one(pool)
            .await
    }

    /// Total number of views recorded for a cartoon.
    pub async fn count_for_cartoon(pool: &PgPool, cartoon_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM views WHERE cartoon_id = $1")
            .bind(cartoon_id)
            .fetch_one(pool)
            .await
    }
}
