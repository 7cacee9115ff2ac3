//! Repository for the `cartoons` table (read side used by producers).

use sqlx::PgPool;
use toonshelf_core::types::DbId;

use crate::models::cartoon::{Cartoon, CreateCartoon};

/// Column list for `cartoons` queries.
const COLUMNS: &str = "\
    id, title, description, poster_url, release_year, \
    is_featured, created_at, updated_at";

/// Lookups against cartoons.
pub struct CartoonRepo;

impl CartoonRepo {
    /// Insert a cartoon, returning the full row.
    pub async fn create(pool: &PgPool, input: &CreateCartoon) -> Result<Cartoon, sqlx::Error> {
        let query = format!(
            "INSERT INTO cartoons (title, description, poster_url, release_year) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Cartoon>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.poster_url)
            .bind(input.release_year)
            .fetch_one(pool)
            .await
    }

    /// Find a cartoon by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Cartoon>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cartoons WHERE id = $1");
        sqlx::query_as::<_, Cartoon>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Cheap existence check used by producers before enqueueing work.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM cartoons WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Fetch cartoons for `ids`, returned in the same order as `ids`.
    ///
    /// Ids with no matching row are skipped.
    pub async fn find_many_ordered(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<Cartoon>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM cartoons WHERE id = ANY($1)");
        let mut rows = sqlx::query_as::<_, Cartoon>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await?;

        let mut ordered = Vec::with_capacity(rows.len());
        for id in ids {
            if let Some(pos) = rows.iter().position(|c| c.id == *id) {
                ordered.push(rows.swap_remove(pos));
            }
        }
        Ok(ordered)
    }
}
