//! Collection mutations.
//!
//! Each operation leaves `self` untouched and returns the next version of the
//! collection; callers hand that version to the sync layer for persistence.

use crate::error::CatalogError;
use crate::types::{Collection, Item, ItemFields, ItemId};

impl Collection {
    /// Pick an id for a new item.
    ///
    /// Ids are wall-clock milliseconds, bumped past the largest existing id so
    /// two inserts in the same millisecond (or a snapshot carrying ids from a
    /// skewed clock) never collide.
    pub fn next_id(&self, now_ms: i64) -> ItemId {
        let floor = self
            .iter()
            .map(|item| item.id)
            .max()
            .map_or(ItemId::MIN, |max| max.saturating_add(1));
        now_ms.max(floor)
    }

    /// Append a new item built from `fields`.
    pub fn insert(&self, fields: ItemFields, now_ms: i64) -> (Collection, Item) {
        let item = Item::from_fields(self.next_id(now_ms), fields);
        let mut next = self.clone();
        next.items_mut().push(item.clone());
        (next, item)
    }

    /// Replace the item with `id`, keeping its position.
    pub fn update(&self, id: ItemId, fields: ItemFields) -> Result<Collection, CatalogError> {
        let index = self.position(id).ok_or(CatalogError::ItemNotFound(id))?;
        let mut next = self.clone();
        next.items_mut()[index] = Item::from_fields(id, fields);
        Ok(next)
    }

    /// Drop the item with `id`. Absent ids leave the collection as it was.
    pub fn remove(&self, id: ItemId) -> Collection {
        self.iter().filter(|item| item.id != id).cloned().collect::<Vec<_>>().into()
    }
}

#[cfg(test)]
#[path = "tests/mutate_tests.rs"]
mod tests;
