use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use roi_core::{RoiCalculator, ScenarioRepository};
use roi_report::ReportRenderer;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{ServerConfig, StorageBackend};
use crate::routes;

/// Shared handler state. Cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn ScenarioRepository>,
    pub calculator: RoiCalculator,
    pub reports: ReportRenderer,
}

impl AppState {
    pub fn new(
        repo: Arc<dyn ScenarioRepository>,
        reports: ReportRenderer,
    ) -> Self {
        Self {
            repo,
            calculator: RoiCalculator::default(),
            reports,
        }
    }

    /// Open the configured repository and build state from `config`.
    pub async fn from_config(config: &ServerConfig) -> Result<Self> {
        let repo = open_storage(config.db_backend, &config.database)
            .await
            .with_context(|| {
                format!(
                    "cannot open {:?} storage at '{}'",
                    config.db_backend, config.database
                )
            })?;

        let reports = match &config.report_dir {
            Some(dir) => ReportRenderer::with_dir(dir),
            None => ReportRenderer::new(),
        };

        Ok(Self::new(repo, reports))
    }
}

/// Open the scenario store for `backend`, running its migrations.
pub async fn open_storage(
    backend: StorageBackend,
    database: &str,
) -> Result<Arc<dyn ScenarioRepository>, roi_core::RepositoryError> {
    match backend {
        StorageBackend::Sqlite => Ok(Arc::new(roi_db_sqlite::open_repository(database).await?)),
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health))
        .route("/simulate", post(routes::simulate))
        .route(
            "/scenarios",
            get(routes::list_scenarios).post(routes::save_scenario),
        )
        .route("/scenarios/:id", get(routes::get_scenario))
        .route("/report/generate", post(routes::generate_report))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
