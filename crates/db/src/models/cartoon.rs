//! Cartoon entity model and DTOs.
//!
//! Catalog CRUD lives elsewhere; this crate only needs cartoons for existence
//! checks and for hydrating recently-viewed ids.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use toonshelf_core::types::{DbId, Timestamp};

/// A row from the `cartoons` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Cartoon {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub poster_url: Option<String>,
    pub release_year: Option<i32>,
    pub is_featured: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a cartoon (seeding and tests).
#[derive(Debug, Deserialize)]
pub struct CreateCartoon {
    pub title: String,
    pub description: Option<String>,
    pub poster_url: Option<String>,
    pub release_year: Option<i32>,
}
