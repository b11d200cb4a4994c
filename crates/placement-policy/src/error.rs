use crate::config::ConfigError;
use crate::eligibility::{EligibilityServiceError, RepositoryError, RosterImportError};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Top-level failure for the binaries and for handlers that return `Result<_, AppError>`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("server error: {0}")]
    Server(#[from] axum::Error),
    #[error("roster error: {0}")]
    Roster(#[from] RosterImportError),
    #[error("eligibility error: {0}")]
    Eligibility(#[from] EligibilityServiceError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Eligibility(err) => eligibility_status(err),
            AppError::Roster(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Config(_) | AppError::Telemetry(_) | AppError::Io(_) | AppError::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Status code for a service failure; shared with the eligibility router.
pub(crate) fn eligibility_status(err: &EligibilityServiceError) -> StatusCode {
    match err {
        EligibilityServiceError::StudentNotFound(_)
        | EligibilityServiceError::CompanyNotFound(_) => StatusCode::NOT_FOUND,
        EligibilityServiceError::InvalidConfig(_) | EligibilityServiceError::InvalidStudent(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        EligibilityServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}
