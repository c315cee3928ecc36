use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{RoiResult, ScenarioInput};

/// A persisted scenario: the input that was saved, the result computed from
/// it, and the store-assigned id. Rows are never updated.
///
/// Serializes flat, one JSON object per row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: i64,
    pub scenario_name: String,

    #[serde(flatten)]
    pub input: ScenarioInput,

    #[serde(flatten)]
    pub result: RoiResult,

    pub created_at: DateTime<Utc>,
}

/// For creating new scenarios (no id or timestamp)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewScenario {
    pub scenario_name: String,

    #[serde(flatten)]
    pub input: ScenarioInput,

    #[serde(flatten)]
    pub result: RoiResult,
}
