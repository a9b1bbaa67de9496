//! Error types: domain failures and their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("Invalid assignment: {0}")]
    InvalidAssignment(String),

    #[error("Invalid puzzle: {0}")]
    InvalidPuzzle(String),

    #[error("A puzzle already exists for {0}")]
    DuplicateDate(NaiveDate),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("No daily puzzle for today")]
    NotFound,

    #[error(transparent)]
    Puzzle(#[from] PuzzleError),

    #[error("Malformed request body: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Puzzle(PuzzleError::InvalidAssignment(_)) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Puzzle(e) => {
                tracing::error!(target: "mostle_backend", error = %e, "Puzzle data error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
