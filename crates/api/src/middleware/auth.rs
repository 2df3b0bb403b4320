//! Authentication extractor for protected route handlers.
//!
//! Every protected request carries `Authorization: Bearer <accessToken>`.
//! The check is stateless and repeated independently for each request:
//! nothing is cached across requests.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use curio_core::Email;

use crate::error::AppError;
use crate::services::token::TokenKind;
use crate::state::AppState;

/// Extractor that requires a verified bearer access token.
///
/// Yields the subject identity (the account email) on success.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(identity): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {identity}!")
/// }
/// ```
pub struct RequireAuth(pub Email);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| AppError::Unauthorized("Access token required".to_owned()))?;

        let claims = state
            .tokens()
            .verify(token, TokenKind::Access)
            .map_err(|_| AppError::Unauthorized("Invalid access token".to_owned()))?;

        let email = Email::parse(&claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid access token".to_owned()))?;

        Ok(Self(email))
    }
}

/// The token from an `Authorization` header of the exact form
/// `Bearer <token>`, if present.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::Request;

    use super::*;

    fn parts_with_header(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/items");
        if let Some(v) = value {
            builder = builder.header(AUTHORIZATION, v);
        }
        let (parts, ()) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[test]
    fn test_bearer_token_extraction() {
        let parts = parts_with_header(Some("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&parts), Some("abc.def.ghi"));
    }

    #[test]
    fn test_missing_header_is_none() {
        let parts = parts_with_header(None);
        assert!(bearer_token(&parts).is_none());
    }

    #[test]
    fn test_wrong_scheme_is_none() {
        let parts = parts_with_header(Some("Basic abc"));
        assert!(bearer_token(&parts).is_none());

        // The shape must be exact; a lowercase scheme does not match.
        let parts = parts_with_header(Some("bearer abc"));
        assert!(bearer_token(&parts).is_none());
    }
}
