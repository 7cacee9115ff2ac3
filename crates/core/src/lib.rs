//! Domain types shared by every toonshelf crate.
//!
//! Has no internal dependencies: the db, cache, worker and api crates all
//! build on the ids, errors, job values and store traits defined here.

pub mod error;
pub mod jobs;
pub mod recently_viewed;
pub mod store;
pub mod types;
