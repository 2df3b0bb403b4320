//! Authentication extractor for protected routes.

pub mod auth;

pub use auth::RequireAuth;
