//! Ordered buffer of pending deferred saves.
//!
//! ## Architecture
//! - Items are kept in a `Vec` in insertion order; `commit` drains it front
//!   to back.
//! - Deduplication is by item identity, not by key: re-queueing the same item
//!   (or a clone of it) does not append, but replaces the queued copy in
//!   place so the latest state of that item is what gets committed. Two
//!   distinct items sharing a key may both be queued; the later one wins on
//!   commit.
//! - Only the crate's own `save_deferred`/`commit` mutate the buffer; callers
//!   get read access (`len`, `iter`, `contains`).
//!
//! ## Performance Trade-offs
//! - `push` scans the buffer, O(n) in pending items. Batches are expected to
//!   be small and short-lived.

use std::mem;

use crate::item::Item;

/// Pending writes owned by one pool instance.
#[derive(Debug)]
pub struct DeferredItems<V> {
    items: Vec<Item<V>>,
}

impl<V> DeferredItems<V> {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Queues `item`; returns `false` if this very item is already queued.
    ///
    /// A re-queued item overwrites its queued copy at the same position.
    pub(crate) fn push(&mut self, item: Item<V>) -> bool {
        match self.items.iter_mut().find(|queued| queued.is_same_item(&item)) {
            Some(queued) => {
                *queued = item;
                false
            },
            None => {
                self.items.push(item);
                true
            },
        }
    }

    /// `true` if `item` (or a clone of it) is queued.
    pub fn contains(&self, item: &Item<V>) -> bool {
        self.items.iter().any(|queued| queued.is_same_item(item))
    }

    /// Number of queued items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates queued items in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Item<V>> {
        self.items.iter()
    }

    /// Removes and returns every queued item, leaving the buffer empty.
    pub(crate) fn take(&mut self) -> Vec<Item<V>> {
        mem::take(&mut self.items)
    }
}

impl<V> Default for DeferredItems<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, V> IntoIterator for &'a DeferredItems<V> {
    type Item = &'a Item<V>;
    type IntoIter = std::slice::Iter<'a, Item<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::CacheItem;

    #[test]
    fn starts_empty() {
        let buffer: DeferredItems<u8> = DeferredItems::default();
        assert!(buffer.is_empty());
        assert_eq!(buffer.len(), 0);
    }

    #[test]
    fn push_keeps_insertion_order() {
        let mut buffer = DeferredItems::new();
        for key in ["c", "a", "b"] {
            assert!(buffer.push(Item::hit(key, 0u8, None).unwrap()));
        }
        let keys: Vec<_> = buffer.iter().map(|item| item.key()).collect();
        assert_eq!(keys, ["c", "a", "b"]);
    }

    #[test]
    fn push_refuses_same_identity() {
        let mut buffer = DeferredItems::new();
        let item = Item::hit("a", 1u8, None).unwrap();
        assert!(buffer.push(item.clone()));
        assert!(buffer.contains(&item));
        assert!(!buffer.push(item));
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn push_of_same_identity_replaces_queued_copy() {
        let mut buffer = DeferredItems::new();
        let stored = Item::hit("a", 1u8, None).unwrap();
        let mut first = stored.clone();
        first.set(10);
        let mut second = stored.clone();
        second.set(20);

        assert!(buffer.push(Item::hit("z", 0u8, None).unwrap()));
        assert!(buffer.push(first));
        assert!(!buffer.push(second));
        assert_eq!(buffer.len(), 2);
        let values: Vec<_> = buffer.iter().map(|item| *item.get().unwrap()).collect();
        assert_eq!(values, [0, 20]);
    }

    #[test]
    fn push_accepts_distinct_items_with_same_key() {
        let mut buffer = DeferredItems::new();
        assert!(buffer.push(Item::hit("a", 1u8, None).unwrap()));
        assert!(buffer.push(Item::hit("a", 2u8, None).unwrap()));
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn take_drains() {
        let mut buffer = DeferredItems::new();
        buffer.push(Item::hit("a", 1u8, None).unwrap());
        buffer.push(Item::hit("b", 2u8, None).unwrap());
        let taken = buffer.take();
        assert_eq!(taken.len(), 2);
        assert!(buffer.is_empty());
    }
}
