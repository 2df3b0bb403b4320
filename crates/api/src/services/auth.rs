//! Credential service.
//!
//! Handles account registration and login against stored Argon2 digests.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use thiserror::Error;

use curio_core::{Email, EmailError};

use crate::models::{Account, Profile, RefreshTokenRecord, StoredAccount, TokenPair};
use crate::services::token::{TokenError, TokenService};
use crate::store::{MemoryStore, RepositoryError};

/// Errors that can occur during credential operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Invalid credentials (unknown email or wrong password - deliberately
    /// one error, never distinguished for callers).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// An account with this email already exists.
    #[error("account already exists")]
    AccountExists,

    /// Password hashing failed.
    #[error("password hashing error")]
    PasswordHash,

    /// Token issuance failed.
    #[error("token error: {0}")]
    Token(#[from] TokenError),

    /// Store operation failed.
    #[error("store error: {0}")]
    Store(#[from] RepositoryError),
}

/// Profile fields captured at registration.
#[derive(Debug, Clone)]
pub struct ProfileFields {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
}

/// Credential service.
///
/// Registers accounts and authenticates login attempts; successful logins
/// issue a token pair and persist the refresh token as outstanding.
pub struct AuthService<'a> {
    store: &'a MemoryStore,
    tokens: &'a TokenService,
}

impl<'a> AuthService<'a> {
    /// Create a new credential service.
    #[must_use]
    pub const fn new(store: &'a MemoryStore, tokens: &'a TokenService) -> Self {
        Self { store, tokens }
    }

    /// Register a new account with its profile.
    ///
    /// Returns the public account view only; the password digest never
    /// leaves the store layer.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email is malformed and
    /// `AuthError::AccountExists` if the email is already registered.
    pub fn register(
        &self,
        email: &str,
        password: &str,
        profile: ProfileFields,
    ) -> Result<Account, AuthError> {
        let email = Email::parse(email)?;
        let password_digest = hash_password(password)?;

        let account = StoredAccount {
            email: email.clone(),
            password_digest,
            created_at: Utc::now(),
        };
        let public = account.public();

        self.store
            .accounts()
            .create_with_profile(
                account,
                Profile {
                    email,
                    first_name: profile.first_name,
                    last_name: profile.last_name,
                    phone_number: profile.phone_number,
                },
            )
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::AccountExists,
                other => AuthError::Store(other),
            })?;

        Ok(public)
    }

    /// Authenticate a login attempt.
    ///
    /// On success issues a token pair, persists the refresh token as an
    /// outstanding record, and returns the pair with the public account
    /// view.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for an unknown email, a
    /// malformed email, or a wrong password - indistinguishably.
    pub fn login(&self, email: &str, password: &str) -> Result<(TokenPair, Account), AuthError> {
        let Ok(email) = Email::parse(email) else {
            return Err(AuthError::InvalidCredentials);
        };

        let account = self
            .store
            .accounts()
            .find_by_email(&email)
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &account.password_digest)?;

        let pair = self.tokens.issue_pair(&email)?;
        self.store.refresh_tokens().insert(RefreshTokenRecord {
            email,
            token: pair.refresh_token.clone(),
        });

        Ok((pair, account.public()))
    }
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a digest.
fn verify_password(password: &str, digest: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(digest).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)
}
