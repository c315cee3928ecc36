pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod routes;

pub use app::{AppState, build_router, open_storage};
pub use config::{ServerConfig, StorageBackend};
pub use error::ApiError;
