//! Profile route handler.

use axum::{Json, extract::State};

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::Profile;
use crate::state::AppState;

/// Handle `GET /me`: the caller's own profile, resolved from the verified
/// token subject.
pub async fn me(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
) -> Result<Json<Profile>> {
    let profile = state
        .store()
        .profiles()
        .find_by_email(&identity)
        .ok_or_else(|| AppError::NotFound("Profile not found".to_owned()))?;

    Ok(Json(profile))
}
