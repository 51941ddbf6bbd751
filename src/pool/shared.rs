//! Lock-guarded pool handle for multi-threaded hosts.
//!
//! ## Architecture
//! - The wrapped pool lives behind `Arc<RwLock<P>>`: one lock per pool.
//! - `get_item` takes the read lock; `save`, `delete_item` and `clear` take
//!   the write lock. Each lock is held for exactly one primitive.
//! - Every handle owns its own deferred buffer. Cloning a handle shares the
//!   pool but starts with an empty buffer.
//!
//! ## Batch Visibility
//! Batches are not atomic across handles: `commit` and `delete_items` lock
//! once per item, so other handles can observe a batch half-applied.
//!
//! ## Example Usage
//! ```rust
//! use std::thread;
//!
//! use cachepool::item::Item;
//! use cachepool::pool::runtime::RuntimePool;
//! use cachepool::pool::shared::SharedPool;
//! use cachepool::traits::Pool;
//!
//! let pool = SharedPool::new(RuntimePool::<u64>::new());
//!
//! let handles: Vec<_> = (0..4u64)
//!     .map(|n| {
//!         let mut pool = pool.clone();
//!         thread::spawn(move || {
//!             let item = Item::hit(format!("key.{n}"), n, None).unwrap();
//!             pool.save(item).unwrap()
//!         })
//!     })
//!     .collect();
//! for handle in handles {
//!     assert!(handle.join().unwrap());
//! }
//!
//! assert_eq!(pool.read().len(), 4);
//! ```

use std::fmt;
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::Result;
use crate::item::Item;
use crate::pool::deferred::DeferredItems;
use crate::traits::{CacheItem, Pool};

/// Shareable handle to a pool guarded by a single `RwLock`.
pub struct SharedPool<P: Pool> {
    inner: Arc<RwLock<P>>,
    deferred: DeferredItems<P::Value>,
}

impl<P: Pool> SharedPool<P> {
    /// Wraps `pool` for sharing.
    pub fn new(pool: P) -> Self {
        Self {
            inner: Arc::new(RwLock::new(pool)),
            deferred: DeferredItems::new(),
        }
    }

    /// Read access to the wrapped pool for inherent queries
    /// (`len`, `metrics`, ...).
    pub fn read(&self) -> RwLockReadGuard<'_, P> {
        self.inner.read()
    }

    /// Exclusive access to the wrapped pool for the guard's lifetime.
    pub fn write(&self) -> RwLockWriteGuard<'_, P> {
        self.inner.write()
    }

    /// Number of live handles to the wrapped pool.
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

impl<P: Pool> Clone for SharedPool<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            deferred: DeferredItems::new(),
        }
    }
}

impl<P> fmt::Debug for SharedPool<P>
where
    P: Pool + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedPool")
            .field("inner", &*self.inner.read())
            .field("deferred", &self.deferred.len())
            .finish()
    }
}

impl<P: Pool> Pool for SharedPool<P> {
    type Value = P::Value;

    fn get_item(&self, key: &str) -> Result<Item<P::Value>> {
        self.inner.read().get_item(key)
    }

    fn clear(&mut self) -> bool {
        self.inner.write().clear()
    }

    fn delete_item(&mut self, key: &str) -> Result<bool> {
        self.inner.write().delete_item(key)
    }

    fn save<I>(&mut self, item: I) -> Result<bool>
    where
        I: CacheItem<Value = P::Value> + 'static,
    {
        self.inner.write().save(item)
    }

    fn deferred_items(&mut self) -> &mut DeferredItems<P::Value> {
        &mut self.deferred
    }
}
