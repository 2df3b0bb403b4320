//! Item repository.

use chrono::{DateTime, Utc};

use curio_core::{Email, ItemId};

use super::{MemoryStore, RepositoryError};
use crate::models::{Item, ItemDraft, ItemPatch};

/// Repository for user-owned catalog items.
///
/// Mutations take the expected owner and run lookup, ownership check and
/// change under one write lock: an update and a delete racing on the same
/// id are serialized, never interleaved.
pub struct ItemRepository<'a> {
    store: &'a MemoryStore,
}

impl<'a> ItemRepository<'a> {
    /// Create a new item repository.
    #[must_use]
    pub(crate) const fn new(store: &'a MemoryStore) -> Self {
        Self { store }
    }

    /// All items owned by `owner`, in creation order.
    #[must_use]
    pub fn filter_by_owner(&self, owner: &Email) -> Vec<Item> {
        self.store
            .items
            .read()
            .rows
            .iter()
            .filter(|i| i.owner_email == *owner)
            .cloned()
            .collect()
    }

    /// Insert a new item for `owner`, assigning the next id.
    #[must_use]
    pub fn insert(&self, owner: &Email, draft: ItemDraft, now: DateTime<Utc>) -> Item {
        let mut table = self.store.items.write();
        table.last_id += 1;
        let item = Item {
            id: ItemId::new(table.last_id),
            owner_email: owner.clone(),
            title: draft.title,
            subtitle: draft.subtitle,
            description: draft.description,
            category: draft.category,
            created_at: now,
            updated_at: now,
        };
        table.rows.push(item.clone());
        item
    }

    /// Merge `patch` into the item with `id`, refreshing `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no item has this id, or
    /// `RepositoryError::NotOwner` if it belongs to a different identity.
    pub fn update(
        &self,
        id: ItemId,
        owner: &Email,
        patch: ItemPatch,
        now: DateTime<Utc>,
    ) -> Result<Item, RepositoryError> {
        let mut table = self.store.items.write();
        let item = table
            .rows
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(RepositoryError::NotFound)?;
        if item.owner_email != *owner {
            return Err(RepositoryError::NotOwner);
        }

        if let Some(title) = patch.title {
            item.title = title;
        }
        if let Some(subtitle) = patch.subtitle {
            item.subtitle = subtitle;
        }
        if let Some(description) = patch.description {
            item.description = description;
        }
        if let Some(category) = patch.category {
            item.category = category;
        }
        item.updated_at = now;

        Ok(item.clone())
    }

    /// Remove the item with `id`.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`ItemRepository::update`].
    pub fn remove(&self, id: ItemId, owner: &Email) -> Result<(), RepositoryError> {
        let mut table = self.store.items.write();
        let pos = table
            .rows
            .iter()
            .position(|i| i.id == id)
            .ok_or(RepositoryError::NotFound)?;
        if table.rows[pos].owner_email != *owner {
            return Err(RepositoryError::NotOwner);
        }
        table.rows.remove(pos);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn draft(title: &str) -> ItemDraft {
        ItemDraft {
            title: title.to_owned(),
            subtitle: "sub".to_owned(),
            description: "desc".to_owned(),
            category: "cat".to_owned(),
        }
    }

    #[test]
    fn test_ids_are_strictly_increasing() {
        let store = MemoryStore::new();
        let owner = Email::parse("a@x.com").unwrap();
        let first = store.items().insert(&owner, draft("one"), Utc::now());
        let second = store.items().insert(&owner, draft("two"), Utc::now());
        assert!(second.id > first.id);
    }

    #[test]
    fn test_filter_is_owner_scoped_and_ordered() {
        let store = MemoryStore::new();
        let a = Email::parse("a@x.com").unwrap();
        let b = Email::parse("b@x.com").unwrap();
        store.items().insert(&a, draft("a1"), Utc::now());
        store.items().insert(&b, draft("b1"), Utc::now());
        store.items().insert(&a, draft("a2"), Utc::now());

        let mine = store.items().filter_by_owner(&a);
        let titles: Vec<_> = mine.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["a1", "a2"]);
    }

    #[test]
    fn test_update_merges_only_supplied_fields() {
        let store = MemoryStore::new();
        let owner = Email::parse("a@x.com").unwrap();
        let item = store.items().insert(&owner, draft("one"), Utc::now());

        let patch = ItemPatch {
            title: Some("renamed".to_owned()),
            ..ItemPatch::default()
        };
        let updated = store
            .items()
            .update(item.id, &owner, patch, Utc::now())
            .unwrap();
        assert_eq!(updated.title, "renamed");
        assert_eq!(updated.subtitle, "sub");
        assert_eq!(updated.description, "desc");
        assert!(updated.updated_at >= item.updated_at);
    }

    #[test]
    fn test_update_by_non_owner_is_rejected() {
        let store = MemoryStore::new();
        let owner = Email::parse("a@x.com").unwrap();
        let other = Email::parse("b@x.com").unwrap();
        let item = store.items().insert(&owner, draft("one"), Utc::now());

        let err = store
            .items()
            .update(item.id, &other, ItemPatch::default(), Utc::now())
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotOwner));
    }

    #[test]
    fn test_remove_unknown_id_is_not_found() {
        let store = MemoryStore::new();
        let owner = Email::parse("a@x.com").unwrap();
        let err = store.items().remove(ItemId::new(99), &owner).unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[test]
    fn test_racing_update_and_delete_serialize() {
        use std::sync::{Arc, Barrier};

        let store = Arc::new(MemoryStore::new());
        let owner = Email::parse("a@x.com").unwrap();

        for _ in 0..16 {
            let id = store.items().insert(&owner, draft("one"), Utc::now()).id;
            let barrier = Arc::new(Barrier::new(2));

            let update = {
                let store = Arc::clone(&store);
                let owner = owner.clone();
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    let patch = ItemPatch {
                        title: Some("renamed".to_owned()),
                        ..ItemPatch::default()
                    };
                    barrier.wait();
                    store.items().update(id, &owner, patch, Utc::now())
                })
            };
            let delete = {
                let store = Arc::clone(&store);
                let owner = owner.clone();
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    store.items().remove(id, &owner)
                })
            };

            let updated = update.join().unwrap();
            let deleted = delete.join().unwrap();

            // Only two serializations exist: update-then-delete, or
            // delete-then-update-fails. The delete wins either way and the
            // update never observes a half-removed row.
            assert!(deleted.is_ok());
            match updated {
                Ok(item) => assert_eq!(item.title, "renamed"),
                Err(e) => assert!(matches!(e, RepositoryError::NotFound)),
            }
            assert!(store.items().filter_by_owner(&owner).is_empty());
        }
    }

    #[test]
    fn test_remove_then_update_is_not_found() {
        let store = MemoryStore::new();
        let owner = Email::parse("a@x.com").unwrap();
        let item = store.items().insert(&owner, draft("one"), Utc::now());

        store.items().remove(item.id, &owner).unwrap();
        let err = store
            .items()
            .update(item.id, &owner, ItemPatch::default(), Utc::now())
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }
}
