pub mod calculations;
pub mod db;
pub mod models;
pub mod normalize;
pub mod scenarios;

pub use calculations::{RoiAssumptions, RoiCalculationError, RoiCalculator};
pub use db::repository::{RepositoryError, ScenarioRepository};
pub use models::*;
pub use scenarios::ScenarioError;
