use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewScenario, Scenario};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),
}

/// Append-only store of saved scenarios.
///
/// Rows are created once and never updated or deleted.
#[async_trait]
pub trait ScenarioRepository: Send + Sync {
    /// Persist a new scenario and return it with its assigned id.
    async fn create_scenario(
        &self,
        scenario: NewScenario,
    ) -> Result<Scenario, RepositoryError>;

    /// Fetch one scenario. Returns [`RepositoryError::NotFound`] for an
    /// unknown id.
    async fn get_scenario(&self, id: i64) -> Result<Scenario, RepositoryError>;

    /// All scenarios, newest id first.
    async fn list_scenarios(&self) -> Result<Vec<Scenario>, RepositoryError>;
}
