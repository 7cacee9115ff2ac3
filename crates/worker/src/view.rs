//! View-recording pool: appends one analytics row per job.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use toonshelf_core::jobs::ViewJob;
use toonshelf_core::store::ViewStore;
use toonshelf_core::types::DbId;

use crate::config::PoolConfig;
use crate::error::WorkerError;
use crate::pool::{JobHandler, WorkerPool};

pub type ViewWorkerPool = WorkerPool<ViewJob>;

/// Writes each [`ViewJob`] to the store.
///
/// The producer has already confirmed the cartoon exists, so there is no
/// re-check here. A failed write is reported and dropped: view counts are
/// approximate analytics.
pub struct ViewRecorder {
    store: Arc<dyn ViewStore>,
}

impl ViewRecorder {
    pub fn new(store: Arc<dyn ViewStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl JobHandler<ViewJob> for ViewRecorder {
    async fn handle(&self, job: ViewJob, worker_id: usize) -> Result<(), WorkerError> {
        let queued_ms = (Utc::now() - job.enqueued_at).num_milliseconds();

        self.store
            .insert_view(job.cartoon_id, job.user_id, job.enqueued_at)
            .await
            .map_err(|source| WorkerError::View {
                user_id: job.user_id,
                cartoon_id: job.cartoon_id,
                source,
            })?;

        tracing::debug!(
            worker_id,
            user_id = job.user_id,
            cartoon_id = job.cartoon_id,
            queued_ms,
            "Recorded view"
        );
        Ok(())
    }
}

impl WorkerPool<ViewJob> {
    /// Build the view pool writing through `store`. The pool is not started.
    pub fn for_views(config: PoolConfig, store: Arc<dyn ViewStore>) -> Result<Self, WorkerError> {
        WorkerPool::new("views", config, Arc::new(ViewRecorder::new(store)))
    }

    /// Queue a view of `cartoon_id` by `user_id`. Fire-and-forget.
    pub async fn enqueue_view(&self, user_id: DbId, cartoon_id: DbId) {
        self.enqueue(ViewJob::new(user_id, cartoon_id)).await;
    }
}
