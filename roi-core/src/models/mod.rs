mod roi_result;
mod scenario;
mod scenario_input;

pub use roi_result::RoiResult;
pub use scenario::{NewScenario, Scenario};
pub use scenario_input::{DEFAULT_IMPLEMENTATION_COST, ScenarioInput};
