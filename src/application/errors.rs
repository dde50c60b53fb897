use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::domain::errors::{MappingError, RepositoryError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("E'lon topilmadi")]
    NotFound,
    #[error("{0}")]
    Mapping(#[from] MappingError),
    #[error("{0}")]
    Infrastructure(String),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Mapping(err) => AppError::Mapping(err),
            RepositoryError::Unexpected(message) => AppError::Infrastructure(message),
        }
    }
}

impl AppError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Mapping(_) | AppError::Infrastructure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Error returned from JSON handlers, rendered as `{"detail": "..."}`.
#[derive(Debug)]
pub struct ApiError(AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        let detail = if status.is_server_error() {
            error!(error = %self.0, "request failed");
            format!("Server error: {}", self.0)
        } else {
            self.0.to_string()
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}
