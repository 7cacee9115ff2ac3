//! View analytics model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use toonshelf_core::types::{DbId, Timestamp};

/// A row from the `views` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct View {
    pub id: DbId,
    pub cartoon_id: DbId,
    pub user_id: Option<DbId>,
    pub viewed_at: Timestamp,
}

/// Request body for recording a view.
#[derive(Debug, Deserialize)]
pub struct RecordView {
    pub cartoon_id: DbId,
}

/// Total view count for a cartoon.
#[derive(Debug, Serialize)]
pub struct ViewCount {
    pub cartoon_id: DbId,
    pub total_views: i64,
}
