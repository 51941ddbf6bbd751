//! Key/value cache facade over any [`Pool`].
//!
//! [`PoolCache`] translates plain get/set/delete calls into item lifecycle
//! calls: fetch an item, mutate it, save it back. It holds no state of its
//! own beyond the pool. Pass `&mut pool` to borrow a pool rather than move it.
//!
//! ## Batch Operations
//!
//! | Call              | Pool calls                                   |
//! |-------------------|----------------------------------------------|
//! | `get_multiple`    | `get_items` (lazy, one fetch per key)        |
//! | `set_multiple`    | `get_item` + `save_deferred` per pair, then one `commit` |
//! | `delete_multiple` | `delete_items` (every key attempted)         |
//!
//! `set_multiple` reports the result of its `commit`, so a batch where any
//! save failed returns `false`.
//!
//! ## Example Usage
//!
//! ```
//! use cachepool::cache::PoolCache;
//! use cachepool::pool::runtime::RuntimePool;
//!
//! let mut pool = RuntimePool::<&str>::new();
//! let mut cache = PoolCache::new(&mut pool);
//!
//! assert_eq!(cache.get("x", None)?, None);
//! assert_eq!(cache.get("x", Some("d"))?, Some("d"));
//! assert!(cache.set("x", "v", None)?);
//! assert_eq!(cache.get("x", None)?, Some("v"));
//!
//! assert!(cache.set_multiple([("a", "1"), ("b", "2")], None)?);
//! let values: Vec<_> = cache
//!     .get_multiple(["a", "b", "c"], Some("d"))
//!     .collect::<Result<_, _>>()?;
//! assert_eq!(values, [Some("1"), Some("2"), Some("d")]);
//! # Ok::<(), cachepool::error::InvalidArgument>(())
//! ```

use tracing::debug;

use crate::error::Result;
use crate::item::{Expiration, Item};
use crate::traits::{CacheItem, Pool};

/// Key/value facade over a pool.
#[derive(Debug, Clone, Default)]
pub struct PoolCache<P> {
    pool: P,
}

impl<P> PoolCache<P> {
    /// Wraps `pool`.
    pub fn new(pool: P) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    pub fn pool(&self) -> &P {
        &self.pool
    }

    /// Mutable access to the underlying pool.
    pub fn pool_mut(&mut self) -> &mut P {
        &mut self.pool
    }

    /// Unwraps the underlying pool.
    pub fn into_inner(self) -> P {
        self.pool
    }
}

impl<P> PoolCache<P>
where
    P: Pool,
    P::Value: Clone,
{
    /// `true` if `key` is currently a hit.
    pub fn has(&self, key: &str) -> Result<bool> {
        self.pool.has_item(key)
    }

    /// The value stored under `key` if it is a hit, otherwise `default`.
    pub fn get(&self, key: &str, default: Option<P::Value>) -> Result<Option<P::Value>> {
        let item = self.pool.get_item(key)?;
        Ok(if item.is_hit() {
            item.into_value()
        } else {
            default
        })
    }

    /// Stores `value` under `key`; returns the pool's save result.
    ///
    /// `ttl == None` clears any expiration the stored item had.
    pub fn set(&mut self, key: &str, value: P::Value, ttl: Option<Expiration>) -> Result<bool> {
        let item = self.prepare(key, value, ttl)?;
        self.pool.save(item)
    }

    /// Deletes `key`; `false` if the pool had nothing to delete.
    pub fn delete(&mut self, key: &str) -> Result<bool> {
        self.pool.delete_item(key)
    }

    /// Clears the pool.
    pub fn clear(&mut self) -> bool {
        self.pool.clear()
    }

    /// Lazily yields, per key and in key order, the stored value or `default`.
    pub fn get_multiple<K>(
        &self,
        keys: K,
        default: Option<P::Value>,
    ) -> impl Iterator<Item = Result<Option<P::Value>>>
    where
        K: IntoIterator,
        K::Item: AsRef<str>,
    {
        self.pool.get_items(keys).map(move |item| {
            item.map(|item| {
                if item.is_hit() {
                    item.into_value()
                } else {
                    default.clone()
                }
            })
        })
    }

    /// Queues every pair as a deferred save and commits once.
    ///
    /// Returns the commit result. If a key is invalid the call fails before
    /// committing; pairs queued up to that point stay in the pool's deferred
    /// buffer until its next commit.
    pub fn set_multiple<K, I>(&mut self, values: I, ttl: Option<Expiration>) -> Result<bool>
    where
        I: IntoIterator<Item = (K, P::Value)>,
        K: AsRef<str>,
    {
        let mut queued = 0usize;
        for (key, value) in values {
            let item = self.prepare(key.as_ref(), value, ttl)?;
            if self.pool.save_deferred(item)? {
                queued += 1;
            }
        }
        let committed = self.pool.commit();
        if !committed {
            debug!(queued, "set_multiple commit reported a failed save");
        }
        Ok(committed)
    }

    /// Deletes every key; `true` only if every key was deleted.
    pub fn delete_multiple<K>(&mut self, keys: K) -> Result<bool>
    where
        K: IntoIterator,
        K::Item: AsRef<str>,
    {
        self.pool.delete_items(keys)
    }

    /// Fetches the item for `key` and applies `ttl` and `value` to it.
    fn prepare(
        &self,
        key: &str,
        value: P::Value,
        ttl: Option<Expiration>,
    ) -> Result<Item<P::Value>> {
        let mut item = self.pool.get_item(key)?;
        match ttl {
            Some(Expiration::At(at)) => {
                item.expires_at(Some(at));
            },
            Some(Expiration::After(ttl)) => {
                item.expires_after(Some(ttl))?;
            },
            None => {
                item.expires_after(None)?;
            },
        }
        item.set(value);
        Ok(item)
    }
}
