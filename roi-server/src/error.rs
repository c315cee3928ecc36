use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use roi_core::{RoiCalculationError, ScenarioError};
use roi_report::ReportError;
use serde_json::json;
use tracing::{error, warn};

/// Error returned by handlers; renders as `{"error": message}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(
        status: StatusCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ScenarioError> for ApiError {
    fn from(err: ScenarioError) -> Self {
        let status = match &err {
            e if e.is_validation() => StatusCode::BAD_REQUEST,
            ScenarioError::NotFound(_) => StatusCode::NOT_FOUND,
            ScenarioError::Calculation(RoiCalculationError::Overflow(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        if err.is_validation() {
            Self::bad_request(err.to_string())
        } else {
            Self::internal(err.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, error = %self.message, "request failed");
        } else {
            warn!(status = %self.status, error = %self.message, "request rejected");
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use roi_core::RepositoryError;
    use roi_core::normalize::InputError;

    use super::*;

    #[test]
    fn scenario_errors_map_to_status() {
        let cases = [
            (ScenarioError::MissingScenarioName, StatusCode::BAD_REQUEST),
            (
                ScenarioError::Input(InputError::InvalidNumber {
                    field: "hourly_wage",
                    value: "\"abc\"".to_string(),
                }),
                StatusCode::BAD_REQUEST,
            ),
            (ScenarioError::NotFound(7), StatusCode::NOT_FOUND),
            (
                ScenarioError::Calculation(RoiCalculationError::Overflow("monthly savings")),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ScenarioError::Storage(RepositoryError::Database("locked".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn missing_name_message() {
        let err = ApiError::from(ScenarioError::MissingScenarioName);

        assert_eq!(err.message(), "Scenario name is required");
    }

    #[test]
    fn report_errors_map_to_status() {
        assert_eq!(
            ApiError::from(ReportError::MissingEmail).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(ReportError::Render("bad font".to_string())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
