pub mod cartoon_repo;
pub mod favourite_repo;
pub mod view_repo;

pub use cartoon_repo::CartoonRepo;
pub use favourite_repo::FavouriteRepo;
pub use view_repo::ViewRepo;
