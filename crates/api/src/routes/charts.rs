//! Analytics chart route handlers.
//!
//! All three endpoints require a bearer token but are identical reads of
//! seeded datasets; the caller's identity is verified and then unused.

use axum::{Json, extract::State};
use serde_json::Value;

use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Handle `GET /charts/area`.
pub async fn area(State(state): State<AppState>, RequireAuth(_): RequireAuth) -> Json<Value> {
    Json(state.store().charts().area())
}

/// Handle `GET /charts/bar`.
pub async fn bar(State(state): State<AppState>, RequireAuth(_): RequireAuth) -> Json<Value> {
    Json(state.store().charts().bar())
}

/// Handle `GET /charts/pie`.
pub async fn pie(State(state): State<AppState>, RequireAuth(_): RequireAuth) -> Json<Value> {
    Json(state.store().charts().pie())
}
