//! Owner-scoped item queries and mutations.

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;

use curio_core::{Email, ItemId};

use crate::models::{Item, ItemDraft, ItemPatch};
use crate::store::{MemoryStore, RepositoryError};

/// Default page when the `page` parameter is absent or unparsable.
const DEFAULT_PAGE: u64 = 1;
/// Default page size when the `limit` parameter is absent or unparsable.
const DEFAULT_LIMIT: u64 = 10;

/// The mutation a caller attempted; authorization failures name it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemAction {
    Update,
    Delete,
}

impl ItemAction {
    /// The verb for client-facing messages.
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Errors that can occur during item operations.
#[derive(Debug, Error)]
pub enum ItemError {
    /// A required field is missing or empty.
    #[error("all fields are required")]
    MissingFields,

    /// No item with the given id exists.
    #[error("item not found")]
    NotFound,

    /// The item belongs to a different identity.
    #[error("not authorized to {} this item", .0.verb())]
    NotOwner(ItemAction),
}

/// Raw listing parameters as they arrive on the query string.
///
/// `page` and `limit` stay strings here on purpose: any value that does
/// not parse as a positive integer falls back to its default instead of
/// failing the request. This leniency is part of the API contract, not an
/// accident.
#[derive(Debug, Default, Clone)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
}

/// Pagination metadata returned beside every listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub items_per_page: u64,
}

/// One page of items plus its pagination metadata.
#[derive(Debug, Serialize)]
pub struct ItemPage {
    pub items: Vec<Item>,
    pub pagination: Pagination,
}

/// Owner-scoped CRUD and listing over catalog items.
pub struct ItemService<'a> {
    store: &'a MemoryStore,
}

impl<'a> ItemService<'a> {
    /// Create a new item service.
    #[must_use]
    pub const fn new(store: &'a MemoryStore) -> Self {
        Self { store }
    }

    /// List the caller's items with search and pagination.
    ///
    /// Filters to items owned by `identity`, then (if `search` is present
    /// and non-empty) to items where the lowercased search term is a
    /// substring of title, subtitle, description or category. Ordering is
    /// stable creation order; a page past the end is empty but keeps the
    /// same totals.
    #[must_use]
    pub fn list(&self, identity: &Email, params: ListParams) -> ItemPage {
        let page = parse_positive(params.page.as_deref(), DEFAULT_PAGE);
        let limit = parse_positive(params.limit.as_deref(), DEFAULT_LIMIT);

        let mut items = self.store.items().filter_by_owner(identity);
        if let Some(needle) = params.search.filter(|s| !s.is_empty()) {
            let needle = needle.to_lowercase();
            items.retain(|item| matches_search(item, &needle));
        }

        let total_items = items.len() as u64;
        let total_pages = total_items.div_ceil(limit);
        let offset = usize::try_from((page - 1).saturating_mul(limit)).unwrap_or(usize::MAX);
        let per_page = usize::try_from(limit).unwrap_or(usize::MAX);

        let items: Vec<Item> = items.into_iter().skip(offset).take(per_page).collect();

        ItemPage {
            items,
            pagination: Pagination {
                current_page: page,
                total_pages,
                total_items,
                items_per_page: limit,
            },
        }
    }

    /// Create a new item owned by `identity`.
    ///
    /// # Errors
    ///
    /// Returns `ItemError::MissingFields` unless all four text fields are
    /// present and non-empty.
    pub fn create(&self, identity: &Email, fields: ItemPatch) -> Result<Item, ItemError> {
        let draft = ItemDraft {
            title: require(fields.title)?,
            subtitle: require(fields.subtitle)?,
            description: require(fields.description)?,
            category: require(fields.category)?,
        };

        Ok(self.store.items().insert(identity, draft, Utc::now()))
    }

    /// Apply a partial patch to an owned item.
    ///
    /// # Errors
    ///
    /// Returns `ItemError::NotFound` for an unknown id and
    /// `ItemError::NotOwner` when `identity` does not own the item, even
    /// when the patch is empty.
    pub fn update(
        &self,
        identity: &Email,
        id: ItemId,
        patch: ItemPatch,
    ) -> Result<Item, ItemError> {
        self.store
            .items()
            .update(id, identity, patch, Utc::now())
            .map_err(|e| into_item_error(e, ItemAction::Update))
    }

    /// Delete an owned item.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`ItemService::update`].
    pub fn delete(&self, identity: &Email, id: ItemId) -> Result<(), ItemError> {
        self.store
            .items()
            .remove(id, identity)
            .map_err(|e| into_item_error(e, ItemAction::Delete))
    }
}

fn into_item_error(e: RepositoryError, action: ItemAction) -> ItemError {
    match e {
        RepositoryError::NotOwner => ItemError::NotOwner(action),
        _ => ItemError::NotFound,
    }
}

/// Parse a positive integer, falling back to `default` for anything else.
fn parse_positive(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(default)
}

/// A present, non-empty field - or the missing-fields error.
fn require(field: Option<String>) -> Result<String, ItemError> {
    field.filter(|s| !s.is_empty()).ok_or(ItemError::MissingFields)
}

/// Case-insensitive substring match over the four text fields.
fn matches_search(item: &Item, needle: &str) -> bool {
    item.title.to_lowercase().contains(needle)
        || item.subtitle.to_lowercase().contains(needle)
        || item.description.to_lowercase().contains(needle)
        || item.category.to_lowercase().contains(needle)
}
