//! Generic bounded worker pool.
//!
//! A [`WorkerPool`] owns one bounded `mpsc` queue and `W` tokio tasks that
//! share its receiver. Producers never wait longer than the configured
//! enqueue timeout: when the queue stays full the job is dropped and counted.
//! Shutdown is cooperative. Workers finish the job in hand, buffered jobs are
//! discarded, and in-flight store calls are never aborted.

use std::fmt::Debug;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError};

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::mpsc::error::SendTimeoutError;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::{millis, PoolConfig};
use crate::error::WorkerError;

/// Processes one job taken off a pool's queue.
///
/// Implementations must be safe to run concurrently on different jobs and
/// must tolerate replays: applying the same job twice has to leave the store
/// as if it had been applied once.
#[async_trait]
pub trait JobHandler<J>: Send + Sync + 'static {
    async fn handle(&self, job: J, worker_id: usize) -> Result<(), WorkerError>;
}

/// Point-in-time view of a pool for monitoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolStats {
    pub name: &'static str,
    pub workers: usize,
    pub capacity: usize,
    pub queue_depth: usize,
    /// Jobs accepted into the queue.
    pub accepted: u64,
    /// Jobs dropped at enqueue (queue full or pool closing).
    pub dropped: u64,
    /// Jobs whose handler completed, including idempotent no-ops.
    pub processed: u64,
    /// Jobs whose handler returned an error. They are not retried.
    pub failed: u64,
}

#[derive(Debug, Default)]
struct Counters {
    accepted: AtomicU64,
    dropped: AtomicU64,
    processed: AtomicU64,
    failed: AtomicU64,
}

pub struct WorkerPool<J> {
    name: &'static str,
    config: PoolConfig,
    sender: mpsc::Sender<J>,
    receiver: Arc<Mutex<mpsc::Receiver<J>>>,
    handler: Arc<dyn JobHandler<J>>,
    cancel: CancellationToken,
    started: AtomicBool,
    workers: std::sync::Mutex<Vec<JoinHandle<()>>>,
    counters: Arc<Counters>,
}

impl<J> WorkerPool<J>
where
    J: Debug + Send + 'static,
{
    /// Create a stopped pool. Call [`start`](Self::start) to spawn workers.
    pub fn new(
        name: &'static str,
        config: PoolConfig,
        handler: Arc<dyn JobHandler<J>>,
    ) -> Result<Self, WorkerError> {
        config.validate()?;
        let (sender, receiver) = mpsc::channel(config.capacity);

        Ok(Self {
            name,
            config,
            sender,
            receiver: Arc::new(Mutex::new(receiver)),
            handler,
            cancel: CancellationToken::new(),
            started: AtomicBool::new(false),
            workers: std::sync::Mutex::new(Vec::new()),
            counters: Arc::new(Counters::default()),
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Spawn the configured number of workers.
    ///
    /// Must be called once, from within a tokio runtime. Later calls are
    /// ignored with a warning.
    pub fn start(&self) {
        if self.started.swap(true, Ordering::SeqCst) {
            tracing::warn!(pool = self.name, "Worker pool already started, ignoring start()");
            return;
        }

        tracing::info!(
            pool = self.name,
            workers = self.config.workers,
            capacity = self.config.capacity,
            "Starting worker pool"
        );

        let mut workers = self.workers.lock().unwrap_or_else(PoisonError::into_inner);
        for worker_id in 0..self.config.workers {
            let worker = Worker {
                id: worker_id,
                pool: self.name,
                receiver: Arc::clone(&self.receiver),
                handler: Arc::clone(&self.handler),
                cancel: self.cancel.clone(),
                counters: Arc::clone(&self.counters),
            };
            workers.push(tokio::spawn(worker.run()));
        }
    }

    /// Queue `job`, waiting at most the configured enqueue timeout for space.
    ///
    /// Never fails from the caller's point of view: a job that cannot be
    /// queued in time, or that arrives while the pool is closing, is dropped,
    /// logged and counted.
    pub async fn enqueue(&self, job: J) {
        if self.cancel.is_cancelled() {
            self.counters.dropped.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(pool = self.name, ?job, "Worker pool closing, job discarded");
            return;
        }

        match self.sender.send_timeout(job, self.config.enqueue_timeout).await {
            Ok(()) => {
                self.counters.accepted.fetch_add(1, Ordering::Relaxed);
            }
            Err(SendTimeoutError::Timeout(job)) => {
                self.counters.dropped.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    pool = self.name,
                    ?job,
                    timeout_ms = millis(self.config.enqueue_timeout),
                    "Worker pool queue is full, dropping job"
                );
            }
            Err(SendTimeoutError::Closed(job)) => {
                self.counters.dropped.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(pool = self.name, ?job, "Worker pool closed, job discarded");
            }
        }
    }

    /// Number of jobs currently buffered.
    pub fn queue_depth(&self) -> usize {
        if self.sender.is_closed() {
            return 0;
        }
        self.sender.max_capacity() - self.sender.capacity()
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            name: self.name,
            workers: self.config.workers,
            capacity: self.config.capacity,
            queue_depth: self.queue_depth(),
            accepted: self.counters.accepted.load(Ordering::Relaxed),
            dropped: self.counters.dropped.load(Ordering::Relaxed),
            processed: self.counters.processed.load(Ordering::Relaxed),
            failed: self.counters.failed.load(Ordering::Relaxed),
        }
    }

    /// Stop the pool.
    ///
    /// Signals every worker to stop taking jobs, waits up to the grace period
    /// for jobs already in hand, then closes the queue and discards whatever
    /// is still buffered. Workers that outlive the grace period are detached,
    /// not aborted.
    pub async fn shutdown(&self) {
        tracing::info!(pool = self.name, "Shutting down worker pool");
        self.cancel.cancel();

        let handles = std::mem::take(
            &mut *self.workers.lock().unwrap_or_else(PoisonError::into_inner),
        );
        let running = handles.len();
        if tokio::time::timeout(self.config.shutdown_grace, futures::future::join_all(handles))
            .await
            .is_err()
        {
            tracing::warn!(
                pool = self.name,
                running,
                grace_ms = millis(self.config.shutdown_grace),
                "Workers still busy after grace period, detaching"
            );
        }

        let mut receiver = self.receiver.lock().await;
        receiver.close();
        let mut discarded = 0usize;
        while receiver.try_recv().is_ok() {
            discarded += 1;
        }
        if discarded > 0 {
            tracing::warn!(pool = self.name, discarded, "Discarded buffered jobs at shutdown");
        }

        tracing::info!(pool = self.name, "Worker pool stopped");
    }
}

/// One processing loop. Owns clones of everything it needs so it can be
/// moved into its own task.
struct Worker<J> {
    id: usize,
    pool: &'static str,
    receiver: Arc<Mutex<mpsc::Receiver<J>>>,
    handler: Arc<dyn JobHandler<J>>,
    cancel: CancellationToken,
    counters: Arc<Counters>,
}

impl<J> Worker<J>
where
    J: Send + 'static,
{
    async fn run(self) {
        tracing::debug!(pool = self.pool, worker_id = self.id, "Worker started");

        while let Some(job) = self.next_job().await {
            match self.handler.handle(job, self.id).await {
                Ok(()) => {
                    self.counters.processed.fetch_add(1, Ordering::Relaxed);
                }
                Err(e) => {
                    self.counters.failed.fetch_add(1, Ordering::Relaxed);
                    tracing::error!(
                        pool = self.pool,
                        worker_id = self.id,
                        error = %e,
                        "Job failed, dropping"
                    );
                }
            }
        }

        tracing::debug!(pool = self.pool, worker_id = self.id, "Worker shutting down");
    }

    /// Wait for the next job, or `None` once the pool is closing.
    ///
    /// Cancellation is checked first so a worker never takes a new job after
    /// shutdown has been signalled. `mpsc::Receiver::recv` is cancel safe, so
    /// losing the race leaves the job in the queue.
    async fn next_job(&self) -> Option<J> {
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => None,
            job = async { self.receiver.lock().await.recv().await } => job,
        }
    }
}
