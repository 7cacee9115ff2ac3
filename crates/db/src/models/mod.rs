pub mod cartoon;
pub mod favourite;
pub mod view;
