//! Authentication route handlers: register, login, refresh.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{Account, TokenPair};
use crate::services::auth::{AuthService, ProfileFields};
use crate::state::AppState;

// =============================================================================
// Request / Response Types
// =============================================================================

/// Registration request body.
///
/// Fields are `Option` so a missing field becomes a 400 validation error
/// rather than a deserialization rejection; an empty string counts as
/// missing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBody {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Refresh request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshBody {
    pub refresh_token: Option<String>,
}

/// Registration response.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
    pub user: Account,
}

/// Login response: the token pair plus the public account view.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub tokens: TokenPair,
    pub user: Account,
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle `POST /register`.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterBody>,
) -> Result<impl IntoResponse> {
    let (Some(email), Some(password), Some(first_name), Some(last_name), Some(phone_number)) = (
        present(body.email),
        present(body.password),
        present(body.first_name),
        present(body.last_name),
        present(body.phone_number),
    ) else {
        return Err(AppError::Validation("All fields are required".to_owned()));
    };

    let auth = AuthService::new(state.store(), state.tokens());
    let user = auth.register(
        &email,
        &password,
        ProfileFields {
            first_name,
            last_name,
            phone_number,
        },
    )?;

    tracing::info!(email = %user.email, "account registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User created successfully",
            user,
        }),
    ))
}

/// Handle `POST /login`.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginBody>,
) -> Result<Json<LoginResponse>> {
    let (Some(email), Some(password)) = (present(body.email), present(body.password)) else {
        return Err(AppError::Validation(
            "Email and password are required".to_owned(),
        ));
    };

    let auth = AuthService::new(state.store(), state.tokens());
    let (tokens, user) = auth.login(&email, &password)?;

    tracing::debug!(email = %user.email, "login succeeded");

    Ok(Json(LoginResponse { tokens, user }))
}

/// Handle `POST /refresh`.
///
/// Single-use rotation: the presented refresh token is consumed and a new
/// pair is issued; presenting the same token again fails with 401.
pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshBody>,
) -> Result<Json<TokenPair>> {
    let Some(token) = present(body.refresh_token) else {
        return Err(AppError::Validation(
            "Refresh token is required".to_owned(),
        ));
    };

    let pair = state.tokens().rotate(state.store(), &token)?;

    Ok(Json(pair))
}

/// A present, non-empty field.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
