//! A pool that accepts everything and retains nothing.
//!
//! Every read is a miss; every write, delete and clear succeeds. Use it as a
//! disabled-cache default, or as the smallest pool that satisfies the
//! contract. Keys are still validated and foreign items still rejected.

use std::fmt;

use crate::error::Result;
use crate::item::{Item, filter_item};
use crate::key::validate_key;
use crate::pool::deferred::DeferredItems;
use crate::traits::{CacheItem, Pool};

/// Always-miss pool.
pub struct NullPool<V> {
    deferred: DeferredItems<V>,
}

impl<V> NullPool<V> {
    pub fn new() -> Self {
        Self {
            deferred: DeferredItems::new(),
        }
    }
}

impl<V> Default for NullPool<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for NullPool<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NullPool")
            .field("deferred", &self.deferred.len())
            .finish()
    }
}

impl<V: 'static> Pool for NullPool<V> {
    type Value = V;

    fn get_item(&self, key: &str) -> Result<Item<V>> {
        Item::miss(key)
    }

    fn clear(&mut self) -> bool {
        true
    }

    fn delete_item(&mut self, key: &str) -> Result<bool> {
        validate_key(key)?;
        Ok(true)
    }

    fn save<I>(&mut self, item: I) -> Result<bool>
    where
        I: CacheItem<Value = V> + 'static,
    {
        filter_item(item)?;
        Ok(true)
    }

    fn deferred_items(&mut self) -> &mut DeferredItems<V> {
        &mut self.deferred
    }
}
