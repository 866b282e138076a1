//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid {kind} identifier '{name}'")]
    InvalidIdentifier { kind: &'static str, name: String },
    #[error("duplicate field '{field}' in table {table}")]
    DuplicateField { table: String, field: String },
    #[error("table {table} is missing required field '{field}'")]
    MissingField { table: String, field: &'static str },
    #[error("duplicate path segment: {0}")]
    DuplicatePathSegment(String),
    #[error("invalid setting {key}='{value}'")]
    InvalidSetting { key: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("query failed: {0}")]
    QueryFailed(#[source] sqlx::Error),
    #[error("write failed: {0}")]
    WriteFailed(#[source] sqlx::Error),
    #[error("decode failed: {0}")]
    DecodeFailed(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DecodeFailed(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_)
            | AppError::QueryFailed(_)
            | AppError::WriteFailed(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "config_error",
            AppError::NotFound(_) => "not_found",
            AppError::QueryFailed(_) => "query_failed",
            AppError::WriteFailed(_) => "write_failed",
            AppError::DecodeFailed(_) => "decode_failed",
            AppError::BadRequest(_) => "bad_request",
            AppError::Internal(_) => "internal_error",
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code().to_string(),
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}
