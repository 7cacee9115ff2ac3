//! Shared fixtures for worker pool integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Semaphore;
use toonshelf_core::error::StoreError;
use toonshelf_core::store::{FavouriteStore, ViewStore};
use toonshelf_core::types::{DbId, Timestamp};
use toonshelf_worker::{PoolConfig, PoolStats};

/// In-memory store with the same guarantees the Postgres store gives the
/// workers: a unique (user, cartoon) favourite and an atomic remove.
///
/// Optionally gated: every write waits for a permit, which lets tests hold a
/// worker mid-job.
#[derive(Default)]
pub struct MemoryActivityStore {
    favourites: Mutex<HashSet<(DbId, DbId)>>,
    views: Mutex<Vec<(DbId, DbId, Timestamp)>>,
    fail_writes: AtomicBool,
    gate: Option<Arc<Semaphore>>,
    attempts: AtomicUsize,
}

impl MemoryActivityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes block until [`release`](Self::release) is called.
    pub fn gated() -> Self {
        Self {
            gate: Some(Arc::new(Semaphore::new(0))),
            ..Self::default()
        }
    }

    /// Let `n` blocked or future writes proceed.
    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(n);
        }
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    /// Number of writes that have started, including blocked and failed ones.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn has_favourite(&self, user_id: DbId, cartoon_id: DbId) -> bool {
        self.favourites
            .lock()
            .unwrap()
            .contains(&(user_id, cartoon_id))
    }

    pub fn favourite_count(&self) -> usize {
        self.favourites.lock().unwrap().len()
    }

    /// Cartoon ids of recorded views, in insertion order.
    pub fn viewed_cartoons(&self) -> Vec<DbId> {
        self.views
            .lock()
            .unwrap()
            .iter()
            .map(|(cartoon_id, _, _)| *cartoon_id)
            .collect()
    }

    async fn enter(&self) -> Result<(), StoreError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl ViewStore for MemoryActivityStore {
    async fn insert_view(
        &self,
        cartoon_id: DbId,
        user_id: DbId,
        viewed_at: Timestamp,
    ) -> Result<(), StoreError> {
        self.enter().await?;
        self.views
            .lock()
            .unwrap()
            .push((cartoon_id, user_id, viewed_at));
        Ok(())
    }
}

#[async_trait]
impl FavouriteStore for MemoryActivityStore {
    async fn insert_favourite(&self, user_id: DbId, cartoon_id: DbId) -> Result<(), StoreError> {
        self.enter().await?;
        if self.favourites.lock().unwrap().insert((user_id, cartoon_id)) {
            Ok(())
        } else {
            Err(StoreError::UniqueViolation {
                constraint: "uq_favourites_user_cartoon".into(),
            })
        }
    }

    async fn remove_favourite(
        &self,
        user_id: DbId,
        cartoon_id: DbId,
    ) -> Result<bool, StoreError> {
        self.enter().await?;
        Ok(self.favourites.lock().unwrap().remove(&(user_id, cartoon_id)))
    }
}

pub fn pool_config(workers: usize, capacity: usize) -> PoolConfig {
    PoolConfig {
        workers,
        capacity,
        ..PoolConfig::default()
    }
}

/// Poll `stats` until `done` holds, failing the test after five seconds.
pub async fn wait_until<S, F>(stats: S, done: F)
where
    S: Fn() -> PoolStats,
    F: Fn(&PoolStats) -> bool,
{
    let reached = tokio::time::timeout(Duration::from_secs(5), async {
        while !done(&stats()) {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await;
    assert!(reached.is_ok(), "timed out waiting, last stats: {:?}", stats());
}

/// Wait until the store has seen `n` write attempts.
pub async fn wait_for_attempts(store: &MemoryActivityStore, n: usize) {
    let reached = tokio::time::timeout(Duration::from_secs(5), async {
        while store.attempts() < n {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await;
    assert!(reached.is_ok(), "store saw {} attempts, expected {n}", store.attempts());
}
