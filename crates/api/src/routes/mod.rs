//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health          - Liveness check (added in `crate::app`)
//!
//! # Auth (issue tokens, no bearer required)
//! POST /register        - Create account + profile
//! POST /login           - Authenticate, issue token pair
//! POST /refresh         - Rotate a refresh token (single-use)
//!
//! # Profile (bearer)
//! GET  /me              - Caller's own profile
//!
//! # Items (bearer, owner-scoped)
//! GET    /items         - List with search + pagination
//! POST   /items         - Create
//! PUT    /items/{id}    - Partial update
//! DELETE /items/{id}    - Delete
//!
//! # Charts (bearer, read-only)
//! GET  /charts/area
//! GET  /charts/bar
//! GET  /charts/pie
//! ```

pub mod auth;
pub mod charts;
pub mod items;
pub mod profile;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh))
}

/// Create the profile routes router.
pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/me", get(profile::me))
}

/// Create the item routes router.
pub fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(items::list).post(items::create))
        .route("/items/{id}", put(items::update).delete(items::remove))
}

/// Create the chart routes router.
pub fn chart_routes() -> Router<AppState> {
    Router::new()
        .route("/charts/area", get(charts::area))
        .route("/charts/bar", get(charts::bar))
        .route("/charts/pie", get(charts::pie))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(profile_routes())
        .merge(item_routes())
        .merge(chart_routes())
}
