//! Catalog item domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use curio_core::{Email, ItemId};

/// A user-owned catalog item.
///
/// Ownership is permanent: `owner_email` is set from the authenticated
/// identity at creation and there is no transfer operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub owner_email: Email,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The four required text fields of a new item, before the store assigns
/// an id and timestamps.
#[derive(Debug, Clone)]
pub struct ItemDraft {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub category: String,
}

/// A partial patch for an item update.
///
/// Only the fields present are merged; absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ItemPatch {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}
