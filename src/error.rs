// src/error.rs

use axum::{
    Json,
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Failures of the quiz core and its data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    /// The flags table could not be read.
    RepositoryUnavailable(String),

    /// The working set holds no flags at all.
    EmptyDataset,

    /// Not enough flags to fill every option slot.
    InsufficientOptions { available: usize, required: usize },

    /// An answer arrived for a session that has no question on screen.
    MissingCurrentQuestion,
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::RepositoryUnavailable(msg) => write!(f, "flag repository unavailable: {}", msg),
            QuizError::EmptyDataset => write!(f, "flag dataset is empty"),
            QuizError::InsufficientOptions { available, required } => write!(
                f,
                "flag dataset has {} records, at least {} are needed",
                available, required
            ),
            QuizError::MissingCurrentQuestion => write!(f, "no active question for this session"),
        }
    }
}

impl std::error::Error for QuizError {}

/// Any database failure while reading flags means the repository is unavailable.
impl From<sqlx::Error> for QuizError {
    fn from(err: sqlx::Error) -> Self {
        QuizError::RepositoryUnavailable(err.to_string())
    }
}

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 400 Bad Request
    BadRequest(String),

    // 404 Not Found
    NotFound(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Converts the error into a JSON response with appropriate HTTP status code.
/// Internal details are logged, never sent to the client.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };
        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Every quiz failure surfaces as a generic 500.
impl From<QuizError> for AppError {
    fn from(err: QuizError) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// Malformed or non-urlencoded form bodies are client errors.
impl From<FormRejection> for AppError {
    fn from(err: FormRejection) -> Self {
        AppError::BadRequest(err.body_text())
    }
}
