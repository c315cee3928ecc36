//! Scenario operations: simulate, save, list, and fetch.
//!
//! These functions sit between a transport (the HTTP server) and the
//! calculator/repository pair. They take raw JSON objects so that validation
//! order is fixed here: the scenario name is checked before any numeric
//! coercion, and coercion happens before anything is persisted.

use rust_decimal::Decimal;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info};

use crate::calculations::{RoiCalculationError, RoiCalculator};
use crate::db::{RepositoryError, ScenarioRepository};
use crate::models::{DEFAULT_IMPLEMENTATION_COST, NewScenario, RoiResult, Scenario};
use crate::normalize::{InputError, normalize_input};

/// Errors returned by scenario operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScenarioError {
    #[error("Scenario name is required")]
    MissingScenarioName,

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Calculation(#[from] RoiCalculationError),

    #[error("Scenario {0} not found")]
    NotFound(i64),

    #[error(transparent)]
    Storage(#[from] RepositoryError),
}

impl ScenarioError {
    /// True for errors caused by the request rather than the system.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingScenarioName | Self::Input(_))
    }
}

/// Extracts a non-blank `scenario_name`, or fails.
fn scenario_name(body: &Map<String, Value>) -> Result<String, ScenarioError> {
    match body.get("scenario_name") {
        Some(Value::String(name)) if !name.trim().is_empty() => Ok(name.clone()),
        _ => Err(ScenarioError::MissingScenarioName),
    }
}

/// Computes the projection for a request body without persisting anything.
///
/// An absent implementation cost is assumed to be
/// [`DEFAULT_IMPLEMENTATION_COST`].
pub fn simulate(
    calculator: &RoiCalculator,
    body: &Map<String, Value>,
) -> Result<RoiResult, ScenarioError> {
    let input = normalize_input(body, DEFAULT_IMPLEMENTATION_COST)?;
    let result = calculator.calculate(&input)?;
    debug!(monthly_savings = %result.monthly_savings, "simulation complete");
    Ok(result)
}

/// Validates, computes, and persists a named scenario.
///
/// The name check runs first; a blank name never reaches coercion or the
/// repository. Every absent numeric field, the implementation cost
/// included, is stored as zero.
pub async fn save_scenario(
    repo: &dyn ScenarioRepository,
    calculator: &RoiCalculator,
    body: &Map<String, Value>,
) -> Result<Scenario, ScenarioError> {
    let scenario_name = scenario_name(body)?;
    let input = normalize_input(body, Decimal::ZERO)?;
    let result = calculator.calculate(&input)?;

    let saved = repo
        .create_scenario(NewScenario {
            scenario_name,
            input,
            result,
        })
        .await?;

    info!(id = saved.id, name = %saved.scenario_name, "scenario saved");
    Ok(saved)
}

/// All saved scenarios, newest first.
pub async fn list_scenarios(repo: &dyn ScenarioRepository) -> Result<Vec<Scenario>, ScenarioError> {
    Ok(repo.list_scenarios().await?)
}

/// One saved scenario. An unknown id yields [`ScenarioError::NotFound`].
pub async fn get_scenario(
    repo: &dyn ScenarioRepository,
    id: i64,
) -> Result<Scenario, ScenarioError> {
    repo.get_scenario(id).await.map_err(|e| match e {
        RepositoryError::NotFound => ScenarioError::NotFound(id),
        other => ScenarioError::Storage(other),
    })
}
