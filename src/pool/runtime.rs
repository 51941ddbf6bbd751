//! In-process pool backed by a hash map.
//!
//! ## Architecture
//! - Items live in an `FxHashMap<String, Item<V>>`, keyed by each item's own
//!   key. Reads hand out clones; a clone shares the stored item's identity.
//! - The map is only mutated through the four pool primitives.
//! - Hit/miss/save/delete counts are tracked with relaxed atomics.
//!
//! ## Expiry
//! By default nothing inspects `expiration_time`: an expired item is still
//! returned as a hit until something deletes it. With
//! [`ExpiryPolicy::EnforceOnRead`] a read treats an expired item as a miss;
//! the stale entry stays in the map until it is overwritten, deleted, cleared
//! or dropped by [`RuntimePool::purge_expired`].
//!
//! ## Example Usage
//! ```rust
//! use cachepool::item::{Item, Ttl};
//! use cachepool::pool::runtime::{ExpiryPolicy, RuntimePool};
//! use cachepool::traits::{CacheItem, Pool};
//!
//! let mut pool = RuntimePool::with_expiry(ExpiryPolicy::EnforceOnRead);
//! let mut item = Item::hit("token", 7u32, None)?;
//! item.expires_after(Some(Ttl::Seconds(-1)))?;
//! pool.save(item)?;
//!
//! assert!(!pool.has_item("token")?);
//! assert_eq!(pool.purge_expired(), 1);
//! assert!(pool.is_empty());
//! # Ok::<(), cachepool::error::InvalidArgument>(())
//! ```
//!
//! ## Thread Safety
//! - `RuntimePool` is single-threaded: mutation needs `&mut self`.
//! - Wrap it in [`SharedPool`](crate::pool::shared::SharedPool) to share it.

use std::fmt;

use chrono::Utc;
use rustc_hash::{FxBuildHasher, FxHashMap};
use tracing::trace;

use crate::error::Result;
use crate::item::{Item, filter_item};
use crate::key::validate_key;
use crate::metrics::{PoolCounters, PoolMetrics};
use crate::pool::deferred::DeferredItems;
use crate::traits::{CacheItem, ExpiringItem, Pool};

/// Whether a pool compares expiration times against the clock on read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExpiryPolicy {
    /// Never look at `expiration_time`; expired items read as hits.
    #[default]
    Ignore,
    /// Treat items whose expiration is at or before now as misses.
    EnforceOnRead,
}

/// Pool holding items in process memory.
pub struct RuntimePool<V> {
    items: FxHashMap<String, Item<V>>,
    deferred: DeferredItems<V>,
    expiry: ExpiryPolicy,
    counters: PoolCounters,
}

impl<V> RuntimePool<V> {
    /// Creates an empty pool that ignores expiration.
    pub fn new() -> Self {
        Self::with_capacity_and_expiry(0, ExpiryPolicy::Ignore)
    }

    /// Creates an empty pool with the given expiry policy.
    pub fn with_expiry(expiry: ExpiryPolicy) -> Self {
        Self::with_capacity_and_expiry(0, expiry)
    }

    /// Creates an empty pool with room for `capacity` items before
    /// reallocating.
    pub fn with_capacity_and_expiry(capacity: usize, expiry: ExpiryPolicy) -> Self {
        Self {
            items: FxHashMap::with_capacity_and_hasher(capacity, FxBuildHasher),
            deferred: DeferredItems::new(),
            expiry,
            counters: PoolCounters::default(),
        }
    }

    /// The configured expiry policy.
    pub fn expiry(&self) -> ExpiryPolicy {
        self.expiry
    }

    /// Number of stored items, expired ones included.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `true` if an item is stored under `key`, without touching counters
    /// or checking expiry.
    pub fn contains_key(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    /// Snapshot pool metrics.
    pub fn metrics(&self) -> PoolMetrics {
        self.counters.snapshot()
    }

    /// Drops every stored item whose expiration is at or before now and
    /// returns how many were dropped. Works under either expiry policy.
    pub fn purge_expired(&mut self) -> usize {
        let now = Utc::now();
        let before = self.items.len();
        self.items.retain(|_, item| !item.is_expired_at(now));
        let purged = before - self.items.len();
        if purged > 0 {
            trace!(purged, "purged expired items");
        }
        purged
    }
}

impl<V> Default for RuntimePool<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for RuntimePool<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimePool")
            .field("len", &self.items.len())
            .field("deferred", &self.deferred.len())
            .field("expiry", &self.expiry)
            .finish()
    }
}

impl<V> Pool for RuntimePool<V>
where
    V: Clone + 'static,
{
    type Value = V;

    fn get_item(&self, key: &str) -> Result<Item<V>> {
        validate_key(key)?;
        match self.items.get(key) {
            Some(item)
                if self.expiry == ExpiryPolicy::EnforceOnRead
                    && item.is_expired_at(Utc::now()) =>
            {
                trace!(key, "stored item expired");
                self.counters.inc_expired();
                self.counters.inc_miss();
                Item::miss(key)
            },
            Some(item) => {
                self.counters.inc_hit();
                Ok(item.clone())
            },
            None => {
                self.counters.inc_miss();
                Item::miss(key)
            },
        }
    }

    fn clear(&mut self) -> bool {
        self.items.clear();
        true
    }

    fn delete_item(&mut self, key: &str) -> Result<bool> {
        validate_key(key)?;
        let removed = self.items.remove(key).is_some();
        if removed {
            self.counters.inc_delete();
        }
        Ok(removed)
    }

    fn save<I>(&mut self, item: I) -> Result<bool>
    where
        I: CacheItem<Value = V> + 'static,
    {
        let item = filter_item(item)?;
        self.items.insert(item.key().to_owned(), item);
        self.counters.inc_save();
        Ok(true)
    }

    fn deferred_items(&mut self) -> &mut DeferredItems<V> {
        &mut self.deferred
    }
}
