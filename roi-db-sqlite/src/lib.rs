pub mod connect;
mod decimal;
pub mod repository;

pub use connect::open_repository;
pub use repository::SqliteRepository;
