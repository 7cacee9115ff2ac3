pub mod favourites;
pub mod recently_viewed;
pub mod views;
pub mod worker_pools;
