//! In-memory record store.
//!
//! A [`MemoryStore`] holds one collection per record type, accessed through
//! typed repositories that are handed to each service. Collections support
//! find, filter, insert, remove and field-merge; all data is per-process
//! and lost on restart.
//!
//! # Concurrency
//!
//! Every collection sits behind a `parking_lot::RwLock`, and every
//! read-check-write sequence with a race window runs inside a single write
//! critical section:
//!
//! - refresh rotation: lookup-then-delete of an outstanding token record is
//!   one atomic [`RefreshTokenRepository::consume`] call, so only one of two
//!   concurrent rotations presenting the same token can succeed;
//! - item mutation: lookup, ownership check and merge/remove happen under
//!   one write lock, so an update and a delete on the same id cannot
//!   interleave invisibly.
//!
//! The write lock serializes the whole collection, which is strictly
//! stronger than the per-key serialization the contract requires.

mod accounts;
mod charts;
mod items;
mod tokens;

pub use accounts::{AccountRepository, ProfileRepository};
pub use charts::ChartRepository;
pub use items::ItemRepository;
pub use tokens::RefreshTokenRepository;

use parking_lot::RwLock;
use serde_json::Value;
use thiserror::Error;

use crate::models::{Item, Profile, RefreshTokenRecord, StoredAccount};

/// Errors surfaced by repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A uniqueness constraint was violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// No record with the given key exists.
    #[error("record not found")]
    NotFound,

    /// The record exists but belongs to a different identity.
    #[error("record owned by another identity")]
    NotOwner,
}

/// Item collection plus its id sequence.
#[derive(Debug, Default)]
pub(crate) struct ItemTable {
    /// Rows in insertion (creation) order.
    pub(crate) rows: Vec<Item>,
    /// Last id handed out; ids are strictly increasing.
    pub(crate) last_id: i64,
}

/// The in-memory record store.
///
/// Cheap to construct; one instance is shared behind the application state
/// and injected into services as typed repositories.
pub struct MemoryStore {
    pub(crate) accounts: RwLock<Vec<StoredAccount>>,
    pub(crate) profiles: RwLock<Vec<Profile>>,
    pub(crate) refresh_tokens: RwLock<Vec<RefreshTokenRecord>>,
    pub(crate) items: RwLock<ItemTable>,
    /// Precomputed chart datasets, immutable after startup.
    pub(crate) charts: ChartTables,
}

/// The three precomputed analytics datasets.
pub(crate) struct ChartTables {
    pub(crate) area: Value,
    pub(crate) bar: Value,
    pub(crate) pie: Value,
}

impl MemoryStore {
    /// Create an empty store with the chart datasets seeded.
    #[must_use]
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(Vec::new()),
            profiles: RwLock::new(Vec::new()),
            refresh_tokens: RwLock::new(Vec::new()),
            items: RwLock::new(ItemTable::default()),
            charts: charts::seed(),
        }
    }

    /// Repository over the account collection.
    #[must_use]
    pub const fn accounts(&self) -> AccountRepository<'_> {
        AccountRepository::new(self)
    }

    /// Repository over the profile collection.
    #[must_use]
    pub const fn profiles(&self) -> ProfileRepository<'_> {
        ProfileRepository::new(self)
    }

    /// Repository over the outstanding refresh token collection.
    #[must_use]
    pub const fn refresh_tokens(&self) -> RefreshTokenRepository<'_> {
        RefreshTokenRepository::new(self)
    }

    /// Repository over the item collection.
    #[must_use]
    pub const fn items(&self) -> ItemRepository<'_> {
        ItemRepository::new(self)
    }

    /// Repository over the chart datasets.
    #[must_use]
    pub const fn charts(&self) -> ChartRepository<'_> {
        ChartRepository::new(self)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}
