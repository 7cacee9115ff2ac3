//! Write-behind worker pools.
//!
//! HTTP producers hand deferred writes to a [`WorkerPool`] and return
//! immediately; a fixed set of tokio tasks drains the pool's bounded queue
//! into the persistent store. Two pools are instantiated: one records views
//! ([`view`]), the other toggles favourites ([`favourite`]).

pub mod config;
pub mod error;
pub mod favourite;
pub mod pool;
pub mod view;

pub use config::PoolConfig;
pub use error::WorkerError;
pub use favourite::{FavouriteToggler, FavouriteWorkerPool};
pub use pool::{JobHandler, PoolStats, WorkerPool};
pub use view::{ViewRecorder, ViewWorkerPool};
