use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::stats::{StatsError, StatsRepository};

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub stats_repository: Arc<dyn StatsRepository>,
}

impl AppState {
    pub fn new(stats_repository: Arc<dyn StatsRepository>) -> Self {
        Self { stats_repository }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<StatsError> for AppError {
    fn from(err: StatsError) -> Self {
        match err {
            StatsError::Validation(msg) => AppError::Validation(msg),
            StatsError::NotFound(msg) => AppError::NotFound(msg),
            StatsError::Storage(msg) => AppError::DatabaseError(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::DatabaseError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", msg),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, format!("Not found: {}", msg)),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
