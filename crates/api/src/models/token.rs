//! Token domain types.

use serde::Serialize;

use curio_core::Email;

/// A freshly issued access/refresh token pair.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// Short-lived token authorizing resource operations.
    pub access_token: String,
    /// Longer-lived token exchanged, single-use, for a new pair.
    pub refresh_token: String,
}

/// An outstanding (issued, not yet consumed) refresh token.
///
/// One record exists per issued refresh token. A record is removed exactly
/// once, during rotation; presenting the same token value again finds no
/// record and fails. Multiple records per email are allowed (multi-device).
/// Expired records are never purged - an expired token already fails
/// verification, so the stale record is permanently inert.
#[derive(Debug, Clone)]
pub struct RefreshTokenRecord {
    pub email: Email,
    pub token: String,
}
