//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ApiConfig;
use crate::services::token::TokenService;
use crate::store::MemoryStore;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; gives handlers access to the record store
/// and the token service.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: MemoryStore,
    tokens: TokenService,
}

impl AppState {
    /// Create application state from configuration, with an empty store.
    #[must_use]
    pub fn new(config: &ApiConfig) -> Self {
        let tokens = TokenService::new(
            &config.jwt_secret,
            config.access_token_ttl,
            config.refresh_token_ttl,
        );

        Self {
            inner: Arc::new(AppStateInner {
                store: MemoryStore::new(),
                tokens,
            }),
        }
    }

    /// Get a reference to the record store.
    #[must_use]
    pub fn store(&self) -> &MemoryStore {
        &self.inner.store
    }

    /// Get a reference to the token service.
    #[must_use]
    pub fn tokens(&self) -> &TokenService {
        &self.inner.tokens
    }
}
