//! Error types for the dose API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dose_schedule::ScheduleError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Person not found: {0}")]
    PersonNotFound(String),

    #[error(transparent)]
    Schedule(ScheduleError),
}

impl From<ScheduleError> for ApiError {
    fn from(err: ScheduleError) -> Self {
        match err {
            ScheduleError::PersonNotFound(name) => ApiError::PersonNotFound(name),
            other => ApiError::Schedule(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::PersonNotFound(name) => {
                (StatusCode::NOT_FOUND, format!("Person not found: {}", name))
            }
            // Stored data is the only source of these, so they are server errors
            ApiError::Schedule(e) => {
                tracing::error!("Schedule error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
