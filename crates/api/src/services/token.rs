//! Token issuance, verification and single-use rotation.
//!
//! Both token kinds are HS256 JWTs signed with the process-wide secret
//! from configuration. Claims carry the subject email, the token kind, the
//! issue and expiry instants, and a random `jti` so two pairs issued within
//! the same second are still distinct token values.

use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::RngCore;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use curio_core::Email;

use crate::models::{RefreshTokenRecord, TokenPair};
use crate::store::MemoryStore;

/// Errors that can occur during token operations.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Bad signature, malformed payload, expired, or wrong kind.
    #[error("invalid token")]
    Invalid,

    /// The presented refresh token has no outstanding record: it was
    /// already consumed, or it was never issued. The two cases are
    /// indistinguishable.
    #[error("refresh token already consumed or unknown")]
    Consumed,

    /// Signing a new token failed.
    #[error("token signing failed")]
    Sign(#[source] jsonwebtoken::errors::Error),
}

/// Which of the two roles a token plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived, authorizes resource operations.
    Access,
    /// Longer-lived, exchanged single-use for a new pair.
    Refresh,
}

/// The signed claim set of a Curio token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject identity (the account email).
    pub sub: String,
    /// Token kind; verification checks it against the expected kind.
    pub kind: TokenKind,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
    /// Issue instant, seconds since the epoch.
    pub iat: i64,
    /// Random token id, makes every issued token value unique.
    pub jti: String,
}

/// Issues and verifies token pairs, and rotates refresh tokens against the
/// outstanding-token set.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    /// Create a token service signing with `secret`.
    #[must_use]
    pub fn new(secret: &SecretString, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            access_ttl,
            refresh_ttl,
        }
    }

    /// Issue an access/refresh pair for `identity`.
    ///
    /// Pure construction: persisting the refresh token as an outstanding
    /// record is the caller's responsibility.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Sign` if JWT encoding fails.
    pub fn issue_pair(&self, identity: &Email) -> Result<TokenPair, TokenError> {
        let access_token = self.sign(identity, TokenKind::Access, self.access_ttl)?;
        let refresh_token = self.sign(identity, TokenKind::Refresh, self.refresh_ttl)?;
        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Verify `token` as a valid, unexpired token of `expected` kind.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Invalid` for any failure: bad signature,
    /// malformed payload, expiry, or kind mismatch. Malformed input never
    /// panics.
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data =
            decode::<Claims>(token, &self.decoding, &validation).map_err(|_| TokenError::Invalid)?;

        if data.claims.kind != expected {
            return Err(TokenError::Invalid);
        }

        Ok(data.claims)
    }

    /// Exchange a refresh token for a new pair, consuming it.
    ///
    /// The lookup-then-delete of the outstanding record is one atomic store
    /// operation, so presenting the same token twice fails the second time
    /// even under concurrent rotation.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Invalid` if the token does not verify as a
    /// refresh token, or `TokenError::Consumed` if no outstanding record
    /// matches.
    pub fn rotate(&self, store: &MemoryStore, presented: &str) -> Result<TokenPair, TokenError> {
        let claims = self.verify(presented, TokenKind::Refresh)?;
        let email = Email::parse(&claims.sub).map_err(|_| TokenError::Invalid)?;

        if !store.refresh_tokens().consume(&email, presented) {
            return Err(TokenError::Consumed);
        }

        let pair = self.issue_pair(&email)?;
        store.refresh_tokens().insert(RefreshTokenRecord {
            email,
            token: pair.refresh_token.clone(),
        });

        Ok(pair)
    }

    fn sign(&self, identity: &Email, kind: TokenKind, ttl: Duration) -> Result<String, TokenError> {
        let now = chrono::Utc::now().timestamp();
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = Claims {
            sub: identity.as_str().to_owned(),
            kind,
            exp: now.saturating_add(ttl_secs),
            iat: now,
            jti: fresh_jti(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(TokenError::Sign)
    }
}

/// Random 128-bit token id, base64url without padding.
fn fresh_jti() -> String {
    let mut bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
