//! Unified pool builder.
//!
//! Picks a pool implementation at runtime and hides the concrete type behind
//! [`AnyPool`], which implements the full [`Pool`] contract by dispatch.
//!
//! ## Example
//!
//! ```rust
//! use cachepool::builder::{PoolBuilder, PoolKind};
//! use cachepool::cache::PoolCache;
//! use cachepool::pool::runtime::ExpiryPolicy;
//!
//! let pool = PoolBuilder::new()
//!     .capacity(128)
//!     .expiry(ExpiryPolicy::EnforceOnRead)
//!     .build::<String>(PoolKind::Runtime);
//!
//! let mut cache = PoolCache::new(pool);
//! cache.set("greeting", "hello".to_string(), None)?;
//! assert_eq!(cache.get("greeting", None)?, Some("hello".to_string()));
//! # Ok::<(), cachepool::error::InvalidArgument>(())
//! ```

use chrono::{DateTime, Utc};

use crate::cache::PoolCache;
use crate::error::Result;
use crate::item::Item;
use crate::metrics::PoolMetrics;
use crate::pool::deferred::DeferredItems;
use crate::pool::null::NullPool;
use crate::pool::runtime::{ExpiryPolicy, RuntimePool};
use crate::traits::{CacheItem, Pool};

/// Available pool implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolKind {
    /// Always misses; every write succeeds and is discarded.
    Null,
    /// In-process hash map.
    Runtime,
}

/// Pool wrapper that provides one concrete type regardless of kind.
#[derive(Debug)]
pub enum AnyPool<V> {
    Null(NullPool<V>),
    Runtime(RuntimePool<V>),
}

impl<V> AnyPool<V> {
    /// Which implementation this wrapper holds.
    pub fn kind(&self) -> PoolKind {
        match self {
            AnyPool::Null(_) => PoolKind::Null,
            AnyPool::Runtime(_) => PoolKind::Runtime,
        }
    }

    /// Metrics snapshot, if the wrapped pool records any.
    pub fn metrics(&self) -> Option<PoolMetrics> {
        match self {
            AnyPool::Null(_) => None,
            AnyPool::Runtime(runtime) => Some(runtime.metrics()),
        }
    }
}

impl<V: Clone + 'static> Pool for AnyPool<V> {
    type Value = V;

    fn get_item(&self, key: &str) -> Result<Item<V>> {
        match self {
            AnyPool::Null(null) => null.get_item(key),
            AnyPool::Runtime(runtime) => runtime.get_item(key),
        }
    }

    fn clear(&mut self) -> bool {
        match self {
            AnyPool::Null(null) => null.clear(),
            AnyPool::Runtime(runtime) => runtime.clear(),
        }
    }

    fn delete_item(&mut self, key: &str) -> Result<bool> {
        match self {
            AnyPool::Null(null) => null.delete_item(key),
            AnyPool::Runtime(runtime) => runtime.delete_item(key),
        }
    }

    fn save<I>(&mut self, item: I) -> Result<bool>
    where
        I: CacheItem<Value = V> + 'static,
    {
        match self {
            AnyPool::Null(null) => null.save(item),
            AnyPool::Runtime(runtime) => runtime.save(item),
        }
    }

    fn deferred_items(&mut self) -> &mut DeferredItems<V> {
        match self {
            AnyPool::Null(null) => null.deferred_items(),
            AnyPool::Runtime(runtime) => runtime.deferred_items(),
        }
    }
}

impl<V> From<NullPool<V>> for AnyPool<V> {
    fn from(pool: NullPool<V>) -> Self {
        AnyPool::Null(pool)
    }
}

impl<V> From<RuntimePool<V>> for AnyPool<V> {
    fn from(pool: RuntimePool<V>) -> Self {
        AnyPool::Runtime(pool)
    }
}

/// Builder for pool instances.
///
/// `capacity` and `expiry` only affect [`PoolKind::Runtime`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PoolBuilder {
    capacity: usize,
    expiry: ExpiryPolicy,
}

impl PoolBuilder {
    /// Builder with no preallocation and [`ExpiryPolicy::Ignore`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items to preallocate room for.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Expiry policy for runtime pools.
    pub fn expiry(mut self, expiry: ExpiryPolicy) -> Self {
        self.expiry = expiry;
        self
    }

    /// Build a pool of the given kind.
    ///
    /// ```rust
    /// use cachepool::builder::{PoolBuilder, PoolKind};
    ///
    /// let runtime = PoolBuilder::new().build::<u64>(PoolKind::Runtime);
    /// let null = PoolBuilder::new().build::<u64>(PoolKind::Null);
    /// assert_eq!(runtime.kind(), PoolKind::Runtime);
    /// assert!(null.metrics().is_none());
    /// ```
    pub fn build<V>(self, kind: PoolKind) -> AnyPool<V> {
        match kind {
            PoolKind::Null => AnyPool::Null(self.build_null()),
            PoolKind::Runtime => AnyPool::Runtime(self.build_runtime()),
        }
    }

    /// Build a [`RuntimePool`] directly.
    pub fn build_runtime<V>(self) -> RuntimePool<V> {
        RuntimePool::with_capacity_and_expiry(self.capacity, self.expiry)
    }

    /// Build a [`NullPool`] directly.
    pub fn build_null<V>(self) -> NullPool<V> {
        NullPool::new()
    }
}

// ---------------------------------------------------------------------------
// Shortcuts
// ---------------------------------------------------------------------------

/// A fresh [`NullPool`].
pub fn null_pool<V>() -> NullPool<V> {
    NullPool::new()
}

/// A fresh [`RuntimePool`] with default settings.
pub fn runtime_pool<V>() -> RuntimePool<V> {
    RuntimePool::new()
}

/// Wraps `pool` in a [`PoolCache`].
pub fn pool_cache<P: Pool>(pool: P) -> PoolCache<P> {
    PoolCache::new(pool)
}

/// An [`Item`] built from all of its parts. See [`Item::with_parts`].
pub fn item<V>(
    key: impl Into<String>,
    value: Option<V>,
    expiration_time: Option<DateTime<Utc>>,
    hit: bool,
) -> Result<Item<V>> {
    Item::with_parts(key, value, expiration_time, hit)
}

/// A hit [`Item`] holding `value`.
pub fn item_hit<V>(
    key: impl Into<String>,
    value: V,
    expiration_time: Option<DateTime<Utc>>,
) -> Result<Item<V>> {
    Item::hit(key, value, expiration_time)
}

/// A miss [`Item`] for `key`.
pub fn item_miss<V>(key: impl Into<String>) -> Result<Item<V>> {
    Item::miss(key)
}
