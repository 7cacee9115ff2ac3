//! Favourite entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use toonshelf_core::types::{DbId, Timestamp};

/// A row from the `favourites` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Favourite {
    pub id: DbId,
    pub user_id: DbId,
    pub cartoon_id: DbId,
    pub created_at: Timestamp,
}

/// A favourite joined with the title of its cartoon, for listing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FavouriteWithCartoon {
    pub id: DbId,
    pub cartoon_id: DbId,
    pub title: String,
    pub poster_url: Option<String>,
    pub created_at: Timestamp,
}

/// Request body for adding a favourite.
#[derive(Debug, Deserialize)]
pub struct AddFavourite {
    pub cartoon_id: DbId,
}
