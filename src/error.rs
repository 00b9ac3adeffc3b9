use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use crate::db::DatabaseError;
use crate::orchestration::OrchestrationError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Internal server error: {0}")]
    Internal(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Message returned for any failed calculation; details stay in the logs.
pub const CALCULATION_FAILED: &str = "Failed to calculate vortex data";

pub const DATABASE_NOT_FOUND: &str = "Database not found";

impl From<OrchestrationError> for AppError {
    fn from(err: OrchestrationError) -> Self {
        match err {
            OrchestrationError::InvalidRequest(msg) => AppError::BadRequest(msg),
            OrchestrationError::UnknownDatabase(_) => {
                AppError::NotFound(DATABASE_NOT_FOUND.to_string())
            }
            _ => AppError::Internal(CALCULATION_FAILED.to_string()),
        }
    }
}

impl From<DatabaseError> for AppError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::InvalidName(name) => {
                AppError::BadRequest(format!("invalid database name: {:?}", name))
            }
            DatabaseError::Unknown(_) => AppError::NotFound(DATABASE_NOT_FOUND.to_string()),
            DatabaseError::Sqlx(e) => {
                error!("Database error: {}", e);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
