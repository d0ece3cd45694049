use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Environment variable {0} not set")]
    EnvironmentVariableNotSetError(String),
    #[error("File read error, {0}")]
    FileReadError(String),
    #[error("Invalid configuration, {0}")]
    ConfigurationError(String),
    #[error("Database connection error, {0}")]
    DatabaseConnectionError(String),
    #[error("Sqlx error: {0}")]
    SqlxError(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
    #[error("{message}")]
    StorageError {
        message: String,
        #[source]
        source: StorageError,
    },
    #[error("Invalid {field}")]
    InvalidIdentifierError { field: String },
    #[error("{0}")]
    ValidationError(String),
    #[error("Validation errors, {0}")]
    ValidatorValidationErrors(#[from] validator::ValidationErrors),
    #[error("Invalid request body, {0}")]
    JsonRejection(#[from] JsonRejection),
    #[error("{0}")]
    NotFoundError(String),
    #[error("{0}")]
    ConflictError(String),
    #[error("IO error, {0}")]
    IoError(#[from] std::io::Error),
}

impl AppError {
    /// Wraps a storage failure with the message reported to the client.
    pub fn storage(message: impl Into<String>) -> impl FnOnce(StorageError) -> Self {
        let message = message.into();
        move |source| Self::StorageError { message, source }
    }

    pub fn invalid_id(field: impl Into<String>) -> Self {
        Self::InvalidIdentifierError {
            field: field.into(),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(source: StorageError) -> Self {
        Self::StorageError {
            message: "Server error".to_string(),
            source,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, error) = match self {
            Self::EnvironmentVariableNotSetError(name) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server error".to_string(),
                Some(format!("Environment variable {name} not set")),
            ),
            Self::FileReadError(e) | Self::ConfigurationError(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server error".to_string(),
                Some(e),
            ),
            Self::DatabaseConnectionError(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database connection error".to_string(),
                Some(e),
            ),
            Self::SqlxError(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server error".to_string(),
                Some(e.to_string()),
            ),
            Self::MigrateError(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server error".to_string(),
                Some(e.to_string()),
            ),
            Self::StorageError { message, source } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                message,
                Some(source.to_string()),
            ),
            Self::InvalidIdentifierError { field } => {
                (StatusCode::BAD_REQUEST, format!("Invalid {field}"), None)
            }
            Self::ValidationError(e) => (StatusCode::BAD_REQUEST, e, None),
            Self::ValidatorValidationErrors(e) => (
                StatusCode::BAD_REQUEST,
                "Validation error".to_string(),
                Some(e.to_string()),
            ),
            Self::JsonRejection(e) => (
                StatusCode::BAD_REQUEST,
                "Invalid request body".to_string(),
                Some(e.body_text()),
            ),
            Self::NotFoundError(e) => (StatusCode::NOT_FOUND, e, None),
            Self::ConflictError(e) => (StatusCode::CONFLICT, e, None),
            Self::IoError(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server error".to_string(),
                Some(e.to_string()),
            ),
        };

        if status.is_server_error() {
            tracing::error!(%status, %message, error = ?error, "request failed");
        }

        let body = match error {
            Some(error) => Json(json!({"message": message, "error": error})),
            None => Json(json!({"message": message})),
        };

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_identifier_is_a_client_error() {
        let response = AppError::invalid_id("category id").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn storage_failures_are_server_errors() {
        let error = AppError::storage("Failed to fetch property listings")(
            StorageError::Backend("connection reset".to_string()),
        );
        assert_eq!(error.to_string(), "Failed to fetch property listings");
        assert_eq!(error.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
