use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use roi_core::{
    NewScenario, RepositoryError, RoiResult, Scenario, ScenarioInput, ScenarioRepository,
};
use sqlx::{Row, sqlite::SqlitePool};
use tracing::debug;

use crate::decimal::{decimal_to_text, get_decimal, get_optional_decimal};

const SELECT_SCENARIO: &str = "SELECT id, scenario_name,
        monthly_invoice_volume, num_ap_staff, avg_hours_per_invoice, hourly_wage,
        error_rate_manual, error_cost, time_horizon_months, one_time_implementation_cost,
        monthly_savings, cumulative_savings, net_savings, payback_months, roi_percentage,
        created_at
     FROM scenarios";

pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn row_to_scenario(row: &sqlx::sqlite::SqliteRow) -> Result<Scenario, RepositoryError> {
    Ok(Scenario {
        id: row
            .try_get("id")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
        scenario_name: row
            .try_get("scenario_name")
            .map_err(|e| RepositoryError::Database(e.to_string()))?,
        input: ScenarioInput {
            monthly_invoice_volume: get_decimal(row, "monthly_invoice_volume")?,
            num_ap_staff: get_decimal(row, "num_ap_staff")?,
            avg_hours_per_invoice: get_decimal(row, "avg_hours_per_invoice")?,
            hourly_wage: get_decimal(row, "hourly_wage")?,
            error_rate_manual: get_decimal(row, "error_rate_manual")?,
            error_cost: get_decimal(row, "error_cost")?,
            time_horizon_months: get_decimal(row, "time_horizon_months")?,
            one_time_implementation_cost: get_decimal(row, "one_time_implementation_cost")?,
        },
        result: RoiResult {
            monthly_savings: get_decimal(row, "monthly_savings")?,
            cumulative_savings: get_decimal(row, "cumulative_savings")?,
            net_savings: get_decimal(row, "net_savings")?,
            payback_months: get_optional_decimal(row, "payback_months")?,
            roi_percentage: get_optional_decimal(row, "roi_percentage")?,
        },
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(|e| RepositoryError::Database(format!("Failed to get created_at: {}", e)))?,
    })
}

#[async_trait]
impl ScenarioRepository for SqliteRepository {
    async fn create_scenario(
        &self,
        scenario: NewScenario,
    ) -> Result<Scenario, RepositoryError> {
        let NewScenario {
            scenario_name,
            input,
            result,
        } = scenario;

        let inserted = sqlx::query(
            "INSERT INTO scenarios (
                scenario_name,
                monthly_invoice_volume, num_ap_staff, avg_hours_per_invoice, hourly_wage,
                error_rate_manual, error_cost, time_horizon_months, one_time_implementation_cost,
                monthly_savings, cumulative_savings, net_savings, payback_months, roi_percentage,
                created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(scenario_name)
        .bind(decimal_to_text(input.monthly_invoice_volume))
        .bind(decimal_to_text(input.num_ap_staff))
        .bind(decimal_to_text(input.avg_hours_per_invoice))
        .bind(decimal_to_text(input.hourly_wage))
        .bind(decimal_to_text(input.error_rate_manual))
        .bind(decimal_to_text(input.error_cost))
        .bind(decimal_to_text(input.time_horizon_months))
        .bind(decimal_to_text(input.one_time_implementation_cost))
        .bind(decimal_to_text(result.monthly_savings))
        .bind(decimal_to_text(result.cumulative_savings))
        .bind(decimal_to_text(result.net_savings))
        .bind(result.payback_months.map(decimal_to_text))
        .bind(result.roi_percentage.map(decimal_to_text))
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let id = inserted.last_insert_rowid();
        debug!(id, "inserted scenario row");
        self.get_scenario(id).await
    }

    async fn get_scenario(
        &self,
        id: i64,
    ) -> Result<Scenario, RepositoryError> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_SCENARIO))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?
            .ok_or(RepositoryError::NotFound)?;

        row_to_scenario(&row)
    }

    async fn list_scenarios(&self) -> Result<Vec<Scenario>, RepositoryError> {
        let rows = sqlx::query(&format!("{} ORDER BY id DESC", SELECT_SCENARIO))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter().map(row_to_scenario).collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;

    async fn setup_test_db() -> SqliteRepository {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");

        let repo = SqliteRepository::new_with_pool(pool).await;
        repo.run_migrations()
            .await
            .expect("Failed to run migrations");
        repo
    }

    fn create_test_scenario(name: &str) -> NewScenario {
        NewScenario {
            scenario_name: name.to_string(),
            input: ScenarioInput {
                monthly_invoice_volume: dec!(1000),
                num_ap_staff: dec!(2),
                avg_hours_per_invoice: dec!(0.5),
                hourly_wage: dec!(25),
                error_rate_manual: dec!(2),
                error_cost: dec!(10),
                time_horizon_months: dec!(12),
                one_time_implementation_cost: dec!(50000),
            },
            result: RoiResult {
                monthly_savings: dec!(27489.00),
                cumulative_savings: dec!(329868.00),
                net_savings: dec!(279868.00),
                payback_months: Some(dec!(1.8)),
                roi_percentage: Some(dec!(559.7)),
            },
        }
    }

    fn create_degenerate_scenario() -> NewScenario {
        NewScenario {
            scenario_name: "Break even".to_string(),
            input: ScenarioInput {
                one_time_implementation_cost: Decimal::ZERO,
                ..ScenarioInput::default()
            },
            result: RoiResult {
                monthly_savings: dec!(0.00),
                cumulative_savings: dec!(0.00),
                net_savings: dec!(0.00),
                payback_months: None,
                roi_percentage: None,
            },
        }
    }

    #[tokio::test]
    async fn test_create_scenario_assigns_id() {
        let repo = setup_test_db().await;

        let saved = repo
            .create_scenario(create_test_scenario("Baseline"))
            .await
            .expect("Should create scenario");

        assert!(saved.id > 0);
        assert_eq!(saved.scenario_name, "Baseline");
    }

    #[tokio::test]
    async fn test_create_scenario_round_trips_all_fields() {
        let repo = setup_test_db().await;
        let new = create_test_scenario("Baseline");

        let saved = repo
            .create_scenario(new.clone())
            .await
            .expect("Should create scenario");
        let fetched = repo
            .get_scenario(saved.id)
            .await
            .expect("Should find scenario");

        assert_eq!(fetched.input, new.input);
        assert_eq!(fetched.result, new.result);
        assert_eq!(fetched.created_at, saved.created_at);
    }

    #[tokio::test]
    async fn test_create_scenario_stores_null_ratios() {
        let repo = setup_test_db().await;

        let saved = repo
            .create_scenario(create_degenerate_scenario())
            .await
            .expect("Should create scenario");

        assert_eq!(saved.result.payback_months, None);
        assert_eq!(saved.result.roi_percentage, None);

        let raw: Option<String> =
            sqlx::query_scalar("SELECT payback_months FROM scenarios WHERE id = ?")
                .bind(saved.id)
                .fetch_one(repo.pool())
                .await
                .expect("Should select column");
        assert_eq!(raw, None);
    }

    #[tokio::test]
    async fn test_decimals_are_stored_as_exact_text() {
        let repo = setup_test_db().await;
        let saved = repo
            .create_scenario(create_test_scenario("Exact"))
            .await
            .expect("Should create scenario");

        let raw: String =
            sqlx::query_scalar("SELECT monthly_savings FROM scenarios WHERE id = ?")
                .bind(saved.id)
                .fetch_one(repo.pool())
                .await
                .expect("Should select column");

        assert_eq!(raw, "27489.00");
    }

    #[tokio::test]
    async fn test_get_scenario_not_found() {
        let repo = setup_test_db().await;

        let result = repo.get_scenario(999).await;

        assert_eq!(result, Err(RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_list_scenarios_empty() {
        let repo = setup_test_db().await;

        let scenarios = repo.list_scenarios().await.expect("Should list scenarios");

        assert!(scenarios.is_empty());
    }

    #[tokio::test]
    async fn test_list_scenarios_newest_first() {
        let repo = setup_test_db().await;
        for name in ["Q1", "Q2", "Q3"] {
            repo.create_scenario(create_test_scenario(name))
                .await
                .expect("Should create scenario");
        }

        let scenarios = repo.list_scenarios().await.expect("Should list scenarios");

        let names: Vec<_> = scenarios.iter().map(|s| s.scenario_name.as_str()).collect();
        assert_eq!(names, vec!["Q3", "Q2", "Q1"]);
        assert!(scenarios[0].id > scenarios[1].id);
        assert!(scenarios[1].id > scenarios[2].id);
    }

    #[tokio::test]
    async fn test_corrupt_row_is_database_error() {
        let repo = setup_test_db().await;
        let saved = repo
            .create_scenario(create_test_scenario("Corrupt"))
            .await
            .expect("Should create scenario");
        sqlx::query("UPDATE scenarios SET hourly_wage = 'n/a' WHERE id = ?")
            .bind(saved.id)
            .execute(repo.pool())
            .await
            .expect("Should corrupt row");

        let result = repo.get_scenario(saved.id).await;

        assert!(matches!(result, Err(RepositoryError::Database(_))));
    }
}
