//! Centralized error handling.
//!
//! Every business-rule violation is a variant of [`AppError`]; the
//! `IntoResponse` impl is the global handler that turns it into a JSON body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("Authentication required")]
    Unauthorized,

    #[error("Access denied")]
    AccessDenied,

    // Users
    #[error("Username {0} is already taken")]
    UsernameDuplicated(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Password does not match")]
    PasswordNotMatch,

    // Addresses
    #[error("Address count exceeds the limit of {0}")]
    AddressCountLimit(u64),

    #[error("Address not found")]
    AddressNotFound,

    #[error("Unknown district code {0}")]
    DistrictNotFound(String),

    // Catalogue & cart
    #[error("Product not found")]
    ProductNotFound,

    #[error("Cart item not found")]
    CartNotFound,

    // Row-count mismatches
    #[error("Insert failed: {0}")]
    Insert(String),

    #[error("Update failed: {0}")]
    Update(String),

    #[error("Delete failed: {0}")]
    Delete(String),

    // Validation
    #[error("{0}")]
    Validation(String),

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[error("Session error")]
    Session(#[from] tower_sessions::session::Error),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::AccessDenied => "ACCESS_DENIED",
            AppError::UsernameDuplicated(_) => "USERNAME_DUPLICATED",
            AppError::UserNotFound => "USER_NOT_FOUND",
            AppError::PasswordNotMatch => "PASSWORD_NOT_MATCH",
            AppError::AddressCountLimit(_) => "ADDRESS_COUNT_LIMIT",
            AppError::AddressNotFound => "ADDRESS_NOT_FOUND",
            AppError::DistrictNotFound(_) => "DISTRICT_NOT_FOUND",
            AppError::ProductNotFound => "PRODUCT_NOT_FOUND",
            AppError::CartNotFound => "CART_NOT_FOUND",
            AppError::Insert(_) => "INSERT_ERROR",
            AppError::Update(_) => "UPDATE_ERROR",
            AppError::Delete(_) => "DELETE_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Session(_) => "SESSION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::PasswordNotMatch => StatusCode::UNAUTHORIZED,
            AppError::AccessDenied => StatusCode::FORBIDDEN,
            AppError::UsernameDuplicated(_) => StatusCode::CONFLICT,
            AppError::UserNotFound
            | AppError::AddressNotFound
            | AppError::ProductNotFound
            | AppError::CartNotFound => StatusCode::NOT_FOUND,
            AppError::AddressCountLimit(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::DistrictNotFound(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Insert(_)
            | AppError::Update(_)
            | AppError::Delete(_)
            | AppError::Database(_)
            | AppError::Session(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Session(e) => {
                tracing::error!("Session error: {:?}", e);
                "A session error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            AppError::Insert(msg) | AppError::Update(msg) | AppError::Delete(msg) => {
                tracing::error!(code = self.code(), "Row count mismatch: {}", msg);
                self.to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn insert(msg: impl Into<String>) -> Self {
        AppError::Insert(msg.into())
    }

    pub fn update(msg: impl Into<String>) -> Self {
        AppError::Update(msg.into())
    }

    pub fn delete(msg: impl Into<String>) -> Self {
        AppError::Delete(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
