use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::header,
    response::IntoResponse,
};
use chrono::Utc;
use roi_core::{RoiResult, Scenario, scenarios};
use roi_report::report_filename;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub message: &'static str,
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub scenario: Value,
}

fn json_object(body: Result<Json<Value>, JsonRejection>) -> Result<Map<String, Value>, ApiError> {
    let Json(value) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ApiError::bad_request("Request body must be a JSON object")),
    }
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn simulate(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<RoiResult>, ApiError> {
    let body = json_object(body)?;
    let result = scenarios::simulate(&state.calculator, &body)?;
    Ok(Json(result))
}

pub async fn save_scenario(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SaveResponse>, ApiError> {
    let body = json_object(body)?;
    let saved = scenarios::save_scenario(state.repo.as_ref(), &state.calculator, &body).await?;
    Ok(Json(SaveResponse {
        message: "Scenario saved successfully!",
        id: saved.id,
    }))
}

pub async fn list_scenarios(State(state): State<AppState>) -> Result<Json<Vec<Scenario>>, ApiError> {
    Ok(Json(scenarios::list_scenarios(state.repo.as_ref()).await?))
}

pub async fn get_scenario(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Scenario>, ApiError> {
    Ok(Json(scenarios::get_scenario(state.repo.as_ref(), id).await?))
}

pub async fn generate_report(
    State(state): State<AppState>,
    body: Result<Json<ReportRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let renderer = state.reports.clone();
    let bytes = tokio::task::spawn_blocking(move || {
        renderer.generate_report(request.email.as_deref(), &request.scenario)
    })
    .await
    .map_err(|e| ApiError::internal(format!("report task failed: {e}")))??;

    let filename = report_filename(Utc::now());
    info!(%filename, size = bytes.len(), "sending report");
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    ))
}
