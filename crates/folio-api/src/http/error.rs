//! Application error type mapping to HTTP status codes and envelope format.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::response::{IntoResponse, Response};
use tracing::error;
use uuid::Uuid;

use folio_types::error::{AccountError, AnalyticsError, CatalogError, ChatError, HireError};

use super::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    Chat(ChatError),
    Catalog(CatalogError),
    Account(AccountError),
    Analytics(AnalyticsError),
    Hire(HireError),
    /// Authentication failure.
    Unauthorized(String),
    /// Malformed request (bad JSON, bad query string, bad path parameter).
    Validation(String),
    Internal(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        AppError::Catalog(e)
    }
}

impl From<AccountError> for AppError {
    fn from(e: AccountError) -> Self {
        AppError::Account(e)
    }
}

impl From<AnalyticsError> for AppError {
    fn from(e: AnalyticsError) -> Self {
        AppError::Analytics(e)
    }
}

impl From<HireError> for AppError {
    fn from(e: HireError) -> Self {
        AppError::Hire(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl AppError {
    /// Envelope error code and client-facing message.
    fn code_and_message(&self) -> (&'static str, String) {
        match self {
            AppError::Chat(ChatError::SessionNotFound) => {
                ("SESSION_NOT_FOUND", "Chat session not found".to_string())
            }
            AppError::Chat(ChatError::MessageNotFound) => {
                ("MESSAGE_NOT_FOUND", "Chat message not found".to_string())
            }
            AppError::Chat(ChatError::Validation(msg)) => ("VALIDATION_ERROR", msg.clone()),
            AppError::Catalog(e @ CatalogError::NotFound { .. }) => ("NOT_FOUND", e.to_string()),
            AppError::Catalog(CatalogError::Invalid(msg)) => ("VALIDATION_ERROR", msg.clone()),
            AppError::Account(AccountError::InvalidToken) => {
                ("UNAUTHORIZED", "Invalid bearer token".to_string())
            }
            AppError::Account(e @ AccountError::EmailTaken(_)) => ("CONFLICT", e.to_string()),
            AppError::Account(AccountError::Invalid(msg)) => ("VALIDATION_ERROR", msg.clone()),
            AppError::Analytics(e @ AnalyticsError::UnknownEventType(_)) => {
                ("VALIDATION_ERROR", e.to_string())
            }
            AppError::Hire(e @ HireError::GigNotFound(_)) => ("GIG_NOT_FOUND", e.to_string()),
            AppError::Hire(HireError::Invalid(msg)) => ("VALIDATION_ERROR", msg.clone()),
            AppError::Unauthorized(msg) => ("UNAUTHORIZED", msg.clone()),
            AppError::Validation(msg) => ("VALIDATION_ERROR", msg.clone()),
            AppError::Chat(ChatError::Repository(e))
            | AppError::Catalog(CatalogError::Repository(e))
            | AppError::Account(AccountError::Repository(e))
            | AppError::Analytics(AnalyticsError::Repository(e))
            | AppError::Hire(HireError::Repository(e)) => {
                error!(error = %e, "storage error while handling request");
                ("INTERNAL_ERROR", "Internal server error".to_string())
            }
            AppError::Internal(msg) => {
                error!(error = %msg, "internal error while handling request");
                ("INTERNAL_ERROR", "Internal server error".to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message) = self.code_and_message();
        ApiResponse::<()>::error(code, &message, Uuid::now_v7().to_string(), 0).into_response()
    }
}
