use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tokio_cron_scheduler::JobSchedulerError;
use tracing::error;

/// Custom Error and Result types to unify errors from all sources.
pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP Error: {0}")]
    Http(String),
    #[error("Upstream Error: {0}")]
    Upstream(String),
    #[error("Parse Error: {0}")]
    Parse(String),
    #[error("Config Error: {0}")]
    Config(String),
    #[error("Scheduler Error: {0}")]
    Scheduler(String),
    #[error("Template Error: {0}")]
    Template(String),
    #[error("Place details Error: {0}")]
    PlaceDetails(String),
    #[error("Unknown category '{0}'")]
    UnknownCategory(String),
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        AppError::Http(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        AppError::Parse(error.to_string())
    }
}

impl From<figment::Error> for AppError {
    fn from(error: figment::Error) -> Self {
        AppError::Config(error.to_string())
    }
}

impl From<minijinja::Error> for AppError {
    fn from(error: minijinja::Error) -> Self {
        AppError::Template(error.to_string())
    }
}

impl From<JobSchedulerError> for AppError {
    fn from(error: JobSchedulerError) -> Self {
        AppError::Scheduler(error.to_string())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, summary) = match &self {
            AppError::UnknownCategory(_) => (StatusCode::NOT_FOUND, "Unknown leaderboard category"),
            AppError::PlaceDetails(_) => {
                error!("{self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to fetch game details",
                )
            }
            _ => {
                error!("{self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to fetch games data",
                )
            }
        };

        let body = ErrorBody {
            success: false,
            error: summary,
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_category_maps_to_not_found() {
        let response = AppError::UnknownCategory("top-losing".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn other_errors_map_to_internal_server_error() {
        let response = AppError::Template("missing template".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn place_details_errors_map_to_internal_server_error() {
        let error = AppError::PlaceDetails("503 Service Unavailable".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
