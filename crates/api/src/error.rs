//! Unified error handling.
//!
//! Provides a single `AppError` type that classifies every handler-level
//! failure into exactly one status code with a short machine-readable JSON
//! message. All route handlers return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::services::auth::AuthError;
use crate::services::items::ItemError;
use crate::services::token::TokenError;
use crate::store::RepositoryError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Credential operation failed.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// Token operation failed.
    #[error("token error: {0}")]
    Token(#[from] TokenError),

    /// Item operation failed.
    #[error("item error: {0}")]
    Item(#[from] ItemError),

    /// Store operation failed.
    #[error("store error: {0}")]
    Store(#[from] RepositoryError),

    /// Bad request from the client (missing or empty fields).
    #[error("validation error: {0}")]
    Validation(String),

    /// The caller is not authenticated.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Store(_) | Self::Internal(_)) {
            tracing::error!(error = %self, "request error");
        }

        let status = match &self {
            Self::Auth(err) => match err {
                AuthError::InvalidEmail(_) | AuthError::AccountExists => StatusCode::BAD_REQUEST,
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::Token(TokenError::Invalid | TokenError::Consumed) => {
                    StatusCode::UNAUTHORIZED
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Token(err) => match err {
                TokenError::Invalid | TokenError::Consumed => StatusCode::UNAUTHORIZED,
                TokenError::Sign(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Item(err) => match err {
                ItemError::MissingFields => StatusCode::BAD_REQUEST,
                ItemError::NotFound => StatusCode::NOT_FOUND,
                ItemError::NotOwner(_) => StatusCode::FORBIDDEN,
            },
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Short client-facing messages; internal details stay in the logs.
        let message = match &self {
            Self::Auth(err) => match err {
                AuthError::InvalidEmail(e) => e.to_string(),
                AuthError::AccountExists => "User already exists".to_owned(),
                AuthError::InvalidCredentials => "Invalid credentials".to_owned(),
                AuthError::Token(TokenError::Invalid | TokenError::Consumed) => {
                    "Invalid token".to_owned()
                }
                _ => "Internal server error".to_owned(),
            },
            Self::Token(err) => match err {
                // Consumed and never-issued are deliberately the same
                // message as a malformed refresh token.
                TokenError::Invalid | TokenError::Consumed => "Invalid refresh token".to_owned(),
                TokenError::Sign(_) => "Internal server error".to_owned(),
            },
            Self::Item(err) => match err {
                ItemError::MissingFields => "All fields are required".to_owned(),
                ItemError::NotFound => "Item not found".to_owned(),
                ItemError::NotOwner(action) => {
                    format!("Not authorized to {} this item", action.verb())
                }
            },
            Self::Validation(msg) | Self::Unauthorized(msg) | Self::NotFound(msg) => msg.clone(),
            Self::Store(_) | Self::Internal(_) => "Internal server error".to_owned(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
