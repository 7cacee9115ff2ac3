//! Favourite-toggle pool.
//!
//! Each (user, cartoon) pair is either absent or present. Both transitions
//! are idempotent: adding an existing favourite and removing a missing one
//! are successful no-ops. Because jobs for the same pair can be picked up by
//! different workers, the final state is whichever job the store applied
//! last; the store's unique constraint and transactional delete keep every
//! intermediate state valid.

use std::sync::Arc;

use async_trait::async_trait;
use toonshelf_core::error::StoreError;
use toonshelf_core::jobs::{FavouriteAction, FavouriteJob};
use toonshelf_core::store::FavouriteStore;
use toonshelf_core::types::DbId;

use crate::config::PoolConfig;
use crate::error::WorkerError;
use crate::pool::{JobHandler, WorkerPool};

pub type FavouriteWorkerPool = WorkerPool<FavouriteJob>;

/// Applies add/remove jobs against a [`FavouriteStore`].
pub struct FavouriteToggler {
    store: Arc<dyn FavouriteStore>,
}

impl FavouriteToggler {
    pub fn new(store: Arc<dyn FavouriteStore>) -> Self {
        Self { store }
    }

    async fn add(&self, job: &FavouriteJob, worker_id: usize) -> Result<(), StoreError> {
        match self.store.insert_favourite(job.user_id, job.cartoon_id).await {
            Ok(()) => {
                tracing::debug!(
                    worker_id,
                    user_id = job.user_id,
                    cartoon_id = job.cartoon_id,
                    "Added favourite"
                );
                Ok(())
            }
            Err(StoreError::UniqueViolation { .. }) => {
                tracing::debug!(
                    worker_id,
                    user_id = job.user_id,
                    cartoon_id = job.cartoon_id,
                    "Cartoon already in favourites (idempotent)"
                );
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    async fn remove(&self, job: &FavouriteJob, worker_id: usize) -> Result<(), StoreError> {
        let removed = self
            .store
            .remove_favourite(job.user_id, job.cartoon_id)
            .await?;
        if removed {
            tracing::debug!(
                worker_id,
                user_id = job.user_id,
                cartoon_id = job.cartoon_id,
                "Removed favourite"
            );
        } else {
            tracing::debug!(
                worker_id,
                user_id = job.user_id,
                cartoon_id = job.cartoon_id,
                "Favourite not found (already removed)"
            );
        }
        Ok(())
    }
}

#[async_trait]
impl JobHandler<FavouriteJob> for FavouriteToggler {
    async fn handle(&self, job: FavouriteJob, worker_id: usize) -> Result<(), WorkerError> {
        let result = match job.action {
            FavouriteAction::Add => self.add(&job, worker_id).await,
            FavouriteAction::Remove => self.remove(&job, worker_id).await,
        };

        result.map_err(|source| WorkerError::Favourite {
            action: job.action,
            user_id: job.user_id,
            cartoon_id: job.cartoon_id,
            source,
        })
    }
}

impl WorkerPool<FavouriteJob> {
    /// Build the favourite pool writing through `store`. The pool is not
    /// started.
    pub fn for_favourites(
        config: PoolConfig,
        store: Arc<dyn FavouriteStore>,
    ) -> Result<Self, WorkerError> {
        WorkerPool::new("favourites", config, Arc::new(FavouriteToggler::new(store)))
    }

    /// Queue an add or remove for (`user_id`, `cartoon_id`). Fire-and-forget.
    pub async fn enqueue_favourite(&self, user_id: DbId, cartoon_id: DbId, action: FavouriteAction) {
        self.enqueue(FavouriteJob::new(user_id, cartoon_id, action))
            .await;
    }
}
