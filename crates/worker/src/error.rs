use toonshelf_core::error::StoreError;
use toonshelf_core::jobs::FavouriteAction;
use toonshelf_core::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("Invalid worker pool configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to record view for user {user_id}, cartoon {cartoon_id}: {source}")]
    View {
        user_id: DbId,
        cartoon_id: DbId,
        #[source]
        source: StoreError,
    },

    #[error("Failed to {action} favourite for user {user_id}, cartoon {cartoon_id}: {source}")]
    Favourite {
        action: FavouriteAction,
        user_id: DbId,
        cartoon_id: DbId,
        #[source]
        source: StoreError,
    },
}
