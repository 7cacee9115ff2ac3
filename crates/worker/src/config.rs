use std::time::Duration;

use crate::error::WorkerError;

/// Default number of workers per pool.
pub const DEFAULT_WORKERS: usize = 5;

/// Default queue capacity per pool.
pub const DEFAULT_CAPACITY: usize = 100;

/// How long `enqueue` waits for queue space before dropping the job.
pub const DEFAULT_ENQUEUE_TIMEOUT: Duration = Duration::from_millis(100);

/// How long `shutdown` waits for in-flight jobs.
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

/// Sizing and timing of one worker pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    /// Number of concurrent workers (W).
    pub workers: usize,
    /// Maximum number of buffered jobs (C).
    pub capacity: usize,
    pub enqueue_timeout: Duration,
    pub shutdown_grace: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            capacity: DEFAULT_CAPACITY,
            enqueue_timeout: DEFAULT_ENQUEUE_TIMEOUT,
            shutdown_grace: DEFAULT_SHUTDOWN_GRACE,
        }
    }
}

impl PoolConfig {
    /// Load a pool configuration from environment variables.
    ///
    /// `prefix` selects the pool, e.g. `"VIEW"` reads `VIEW_POOL_WORKERS`.
    ///
    /// | Env Var                   | Default |
    /// |---------------------------|---------|
    /// | `{prefix}_POOL_WORKERS`   | `5`     |
    /// | `{prefix}_POOL_CAPACITY`  | `100`   |
    /// | `POOL_ENQUEUE_TIMEOUT_MS` | `100`   |
    /// | `POOL_SHUTDOWN_GRACE_MS`  | `1000`  |
    pub fn from_env(prefix: &str) -> Self {
        let workers = env_or(&format!("{prefix}_POOL_WORKERS"), DEFAULT_WORKERS as u64) as usize;
        let capacity = env_or(&format!("{prefix}_POOL_CAPACITY"), DEFAULT_CAPACITY as u64) as usize;
        let enqueue_timeout_ms = env_or(
            "POOL_ENQUEUE_TIMEOUT_MS",
            millis(DEFAULT_ENQUEUE_TIMEOUT),
        );
        let shutdown_grace_ms = env_or(
            "POOL_SHUTDOWN_GRACE_MS",
            millis(DEFAULT_SHUTDOWN_GRACE),
        );

        Self {
            workers,
            capacity,
            enqueue_timeout: Duration::from_millis(enqueue_timeout_ms),
            shutdown_grace: Duration::from_millis(shutdown_grace_ms),
        }
    }

    /// Reject configurations the pool cannot run with.
    pub fn validate(&self) -> Result<(), WorkerError> {
        if self.workers == 0 {
            return Err(WorkerError::InvalidConfig(
                "worker count must be at least 1".to_string(),
            ));
        }
        if self.capacity == 0 {
            return Err(WorkerError::InvalidConfig(
                "queue capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Whole milliseconds in `duration`, saturating at `u64::MAX`.
pub(crate) fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn env_or(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .map(|raw| {
            raw.parse()
                .unwrap_or_else(|_| panic!("{name} must be a valid u64, got '{raw}'"))
        })
        .unwrap_or(default)
}
