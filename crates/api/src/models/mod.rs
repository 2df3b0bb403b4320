//! Domain types.
//!
//! These types represent validated domain objects separate from the wire
//! request/response shapes defined next to each route handler.

pub mod account;
pub mod item;
pub mod token;

pub use account::{Account, Profile, StoredAccount};
pub use item::{Item, ItemDraft, ItemPatch};
pub use token::{RefreshTokenRecord, TokenPair};
