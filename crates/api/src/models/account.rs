//! Account and profile domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use curio_core::Email;

/// The public view of an account, safe to return to any caller.
///
/// The password digest never appears here; it lives only in
/// [`StoredAccount`] inside the store layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// The account's identity key.
    pub email: Email,
    /// When the account was registered.
    pub created_at: DateTime<Utc>,
}

/// An account as persisted, including the password digest.
///
/// Accounts are created on registration and never mutated or deleted.
#[derive(Debug, Clone)]
pub struct StoredAccount {
    pub email: Email,
    /// Argon2id PHC-format digest of the password.
    pub password_digest: String,
    pub created_at: DateTime<Utc>,
}

impl StoredAccount {
    /// The public view of this account.
    #[must_use]
    pub fn public(&self) -> Account {
        Account {
            email: self.email.clone(),
            created_at: self.created_at,
        }
    }
}

/// Contact profile created alongside an account, one per email.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
}
