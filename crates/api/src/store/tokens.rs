//! Outstanding refresh token repository.

use curio_core::Email;

use super::MemoryStore;
use crate::models::RefreshTokenRecord;

/// Repository for outstanding (issued, unconsumed) refresh tokens.
pub struct RefreshTokenRepository<'a> {
    store: &'a MemoryStore,
}

impl<'a> RefreshTokenRepository<'a> {
    /// Create a new refresh token repository.
    #[must_use]
    pub(crate) const fn new(store: &'a MemoryStore) -> Self {
        Self { store }
    }

    /// Record a freshly issued refresh token.
    pub fn insert(&self, record: RefreshTokenRecord) {
        self.store.refresh_tokens.write().push(record);
    }

    /// Atomically consume the record matching `(email, token)`.
    ///
    /// Lookup and removal happen under one write lock, so a given token
    /// value can be consumed at most once no matter how many rotations
    /// present it concurrently. Returns `false` if no matching record
    /// exists - already consumed and never issued are indistinguishable.
    #[must_use]
    pub fn consume(&self, email: &Email, token: &str) -> bool {
        let mut records = self.store.refresh_tokens.write();
        let Some(pos) = records
            .iter()
            .position(|r| r.email == *email && r.token == token)
        else {
            return false;
        };
        records.remove(pos);
        true
    }

    /// Number of outstanding records for an email (multi-device sessions).
    #[must_use]
    pub fn count_for(&self, email: &Email) -> usize {
        self.store
            .refresh_tokens
            .read()
            .iter()
            .filter(|r| r.email == *email)
            .count()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn record(email: &str, token: &str) -> RefreshTokenRecord {
        RefreshTokenRecord {
            email: Email::parse(email).unwrap(),
            token: token.to_owned(),
        }
    }

    #[test]
    fn test_consume_is_single_use() {
        let store = MemoryStore::new();
        let email = Email::parse("a@x.com").unwrap();
        store.refresh_tokens().insert(record("a@x.com", "tok-1"));

        assert!(store.refresh_tokens().consume(&email, "tok-1"));
        assert!(!store.refresh_tokens().consume(&email, "tok-1"));
    }

    #[test]
    fn test_consume_unknown_token_fails() {
        let store = MemoryStore::new();
        let email = Email::parse("a@x.com").unwrap();
        assert!(!store.refresh_tokens().consume(&email, "never-issued"));
    }

    #[test]
    fn test_multi_device_records_are_independent() {
        let store = MemoryStore::new();
        let email = Email::parse("a@x.com").unwrap();
        store.refresh_tokens().insert(record("a@x.com", "phone"));
        store.refresh_tokens().insert(record("a@x.com", "laptop"));
        assert_eq!(store.refresh_tokens().count_for(&email), 2);

        assert!(store.refresh_tokens().consume(&email, "phone"));
        assert_eq!(store.refresh_tokens().count_for(&email), 1);
        assert!(store.refresh_tokens().consume(&email, "laptop"));
    }

    #[test]
    fn test_consume_requires_matching_email() {
        let store = MemoryStore::new();
        store.refresh_tokens().insert(record("a@x.com", "tok-1"));

        let other = Email::parse("b@x.com").unwrap();
        assert!(!store.refresh_tokens().consume(&other, "tok-1"));
    }

    #[test]
    fn test_racing_consumes_succeed_exactly_once() {
        use std::sync::{Arc, Barrier};

        let store = Arc::new(MemoryStore::new());
        let email = Email::parse("a@x.com").unwrap();
        store.refresh_tokens().insert(record("a@x.com", "tok-1"));

        let threads = 16;
        let barrier = Arc::new(Barrier::new(threads));
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let store = Arc::clone(&store);
                let barrier = Arc::clone(&barrier);
                let email = email.clone();
                std::thread::spawn(move || {
                    barrier.wait();
                    store.refresh_tokens().consume(&email, "tok-1")
                })
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&ok| ok)
            .count();
        assert_eq!(successes, 1);
        assert_eq!(store.refresh_tokens().count_for(&email), 0);
    }
}
