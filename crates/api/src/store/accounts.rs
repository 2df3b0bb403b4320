//! Account and profile repositories.

use curio_core::Email;

use super::{MemoryStore, RepositoryError};
use crate::models::{Profile, StoredAccount};

/// Repository for account records.
pub struct AccountRepository<'a> {
    store: &'a MemoryStore,
}

impl<'a> AccountRepository<'a> {
    /// Create a new account repository.
    #[must_use]
    pub(crate) const fn new(store: &'a MemoryStore) -> Self {
        Self { store }
    }

    /// Find an account by its email, digest included.
    #[must_use]
    pub fn find_by_email(&self, email: &Email) -> Option<StoredAccount> {
        self.store
            .accounts
            .read()
            .iter()
            .find(|a| a.email == *email)
            .cloned()
    }

    /// Insert an account together with its profile.
    ///
    /// The uniqueness check and both inserts run under the account write
    /// lock, so two concurrent registrations for the same email cannot both
    /// succeed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if an account with this email
    /// already exists.
    pub fn create_with_profile(
        &self,
        account: StoredAccount,
        profile: Profile,
    ) -> Result<(), RepositoryError> {
        let mut accounts = self.store.accounts.write();
        if accounts.iter().any(|a| a.email == account.email) {
            return Err(RepositoryError::Conflict("email already exists".to_owned()));
        }
        accounts.push(account);
        self.store.profiles.write().push(profile);
        Ok(())
    }
}

/// Repository for profile records.
pub struct ProfileRepository<'a> {
    store: &'a MemoryStore,
}

impl<'a> ProfileRepository<'a> {
    /// Create a new profile repository.
    #[must_use]
    pub(crate) const fn new(store: &'a MemoryStore) -> Self {
        Self { store }
    }

    /// Find the profile belonging to an email, if any.
    #[must_use]
    pub fn find_by_email(&self, email: &Email) -> Option<Profile> {
        self.store
            .profiles
            .read()
            .iter()
            .find(|p| p.email == *email)
            .cloned()
    }
}
