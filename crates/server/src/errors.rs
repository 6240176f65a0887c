use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kiomate::{GenerationError, InsightError, StoreError};
use serde_json::json;
use tracing::error;

/// A custom error type for the server application.
///
/// This enum encapsulates different kinds of errors that can occur within the server,
/// allowing them to be converted into appropriate HTTP responses.
pub enum AppError {
    /// Errors from the insight-generation pipeline.
    Insight(InsightError),
    /// Errors from a direct generation call (the chat flow).
    Generation(GenerationError),
    /// Errors from the persistence gateway.
    Store(StoreError),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<InsightError> for AppError {
    fn from(err: InsightError) -> Self {
        AppError::Insight(err)
    }
}

impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        AppError::Generation(err)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Store(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::Insight(InsightError::Generation(err)) | AppError::Generation(err) => {
                error!("GenerationError: {err:?}");
                (StatusCode::BAD_GATEWAY, format!("AI provider error: {err}"))
            }
            AppError::Insight(InsightError::Schema(err)) => {
                // The raw model reply stays in the server log; clients only
                // see the problem list.
                error!("SchemaError: {err}. Raw reply: {}", err.raw_reply());
                (
                    StatusCode::BAD_GATEWAY,
                    format!("AI reply was not usable: {err}"),
                )
            }
            AppError::Store(StoreError::Conflict(id)) => (
                StatusCode::CONFLICT,
                format!("Identifier already exists: {id}"),
            ),
            AppError::Store(StoreError::NotFound(id)) => (
                StatusCode::NOT_FOUND,
                format!("No record found for identifier: {id}"),
            ),
            AppError::Store(err) => {
                error!("StoreError: {err:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A storage error occurred.".to_string(),
                )
            }
            AppError::Internal(err) => {
                error!("Internal server error: {err:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
