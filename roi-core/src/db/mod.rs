pub mod repository;

pub use repository::{RepositoryError, ScenarioRepository};
