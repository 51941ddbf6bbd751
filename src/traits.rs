//! # Item and Pool Trait Hierarchy
//!
//! This module defines the capability traits of the cache subsystem: what an
//! item must offer, and what a pool must offer. Concrete pools implement four
//! primitives; every batch and deferred operation is derived from those once,
//! here, as default methods.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────┐
//!   │            CacheItem                 │
//!   │                                      │
//!   │  key(&) → &str                       │
//!   │  get(&) → Option<&Value>             │
//!   │  set(&mut, Value) → &mut Self        │
//!   │  is_hit(&) → bool                    │
//!   │  expires_at(&mut, Option<DateTime>)  │
//!   │  expires_after(&mut, Option<Ttl>)    │
//!   └──────────────────┬───────────────────┘
//!                      │
//!                      ▼
//!   ┌──────────────────────────────────────┐
//!   │           ExpiringItem               │
//!   │                                      │
//!   │ expiration_time(&) → Option<DateTime>│
//!   │  is_expired_at(&, now) → bool        │
//!   └──────────────────────────────────────┘
//!
//!   ┌───────────────────────────────────────────────────────────────────┐
//!   │                              Pool                                 │
//!   │                                                                   │
//!   │  primitives                      derived (default methods)        │
//!   │  ─────────────────────────────   ──────────────────────────────── │
//!   │  get_item(&, key) → Item         get_items(&, keys) → GetItems    │
//!   │  save(&mut, item) → bool         has_item(&, key) → bool          │
//!   │  delete_item(&mut, key) → bool   delete_items(&mut, keys) → bool  │
//!   │  clear(&mut) → bool              save_deferred(&mut, item) → bool │
//!   │  deferred_items(&mut)            commit(&mut) → bool              │
//!   └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Failure Channels
//!
//! | Outcome                              | Channel                    |
//! |--------------------------------------|----------------------------|
//! | Malformed key                        | `Err(InvalidArgument)`     |
//! | Out-of-range expiration              | `Err(InvalidArgument)`     |
//! | Item lacking the expiring capability | `Err(InvalidArgument)`     |
//! | Key absent on delete                 | `Ok(false)`                |
//! | Partial failure inside a batch       | `Ok(false)` / `false`      |
//!
//! ## Batch Semantics
//!
//! ```text
//!   delete_items([k1, k2, k3])        commit()
//!   ═══════════════════════════       ═══════════════════════════
//!   validate k1, k2, k3 up front      take buffer  [i1, i2, i3]
//!   delete_item(k1) → true            save(i1) → true
//!   delete_item(k2) → false  ──┐      save(i2) → false  ──┐
//!   delete_item(k3) → true     │      save(i3) → true     │
//!                              ▼                          ▼
//!   result = true ∧ false ∧ true      result = AND, buffer stays empty
//! ```
//!
//! Every key / item is attempted; a failure in the middle does not stop the
//! rest. Batches are not atomic: work done before a failure stays done.
//!
//! ## Thread Safety
//!
//! The trait takes `&mut self` for anything that mutates. Pools are
//! single-actor by default; share one across threads through
//! [`SharedPool`](crate::pool::shared::SharedPool).

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::error::Result;
use crate::item::{Item, Ttl, filter_item};
use crate::key::validate_key;
use crate::pool::deferred::DeferredItems;

/// The base shape every cache item offers.
///
/// Pools only persist their own expiring [`Item`]; a different implementation
/// of this trait handed to [`Pool::save`] is rejected.
pub trait CacheItem {
    /// Payload type.
    type Value;

    /// The item's key.
    fn key(&self) -> &str;

    /// The stored value, regardless of the hit flag. Check
    /// [`is_hit`](Self::is_hit) before trusting it.
    fn get(&self) -> Option<&Self::Value>;

    /// Stores `value` and marks the item as a hit.
    fn set(&mut self, value: Self::Value) -> &mut Self;

    /// `true` if the value is present and valid.
    fn is_hit(&self) -> bool;

    /// Sets the absolute expiration; `None` means never expires.
    fn expires_at(&mut self, expiration: Option<DateTime<Utc>>) -> &mut Self;

    /// Sets the expiration to `now + ttl`, computed at call time; `None`
    /// means never expires.
    fn expires_after(&mut self, ttl: Option<Ttl>) -> Result<&mut Self>;
}

/// Items that can report their absolute expiration time.
///
/// This is the capability pools require: a pool that enforces expiry has to
/// read it back.
pub trait ExpiringItem: CacheItem {
    /// Absolute expiration, `None` if the item never expires.
    fn expiration_time(&self) -> Option<DateTime<Utc>>;

    /// `true` if the expiration lies at or before `now`.
    fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration_time().is_some_and(|at| at <= now)
    }
}

/// A storage-agnostic pool of cache items.
///
/// Implementors provide [`get_item`](Self::get_item), [`save`](Self::save),
/// [`delete_item`](Self::delete_item), [`clear`](Self::clear) and access to
/// their [`DeferredItems`] buffer. Everything else comes for free.
///
/// # Example
///
/// ```
/// use cachepool::item::Item;
/// use cachepool::pool::runtime::RuntimePool;
/// use cachepool::traits::{CacheItem, Pool};
///
/// let mut pool: RuntimePool<String> = RuntimePool::new();
///
/// let mut item = pool.get_item("greeting")?;
/// assert!(!item.is_hit());
///
/// item.set("hello".to_string());
/// assert!(pool.save(item)?);
/// assert!(pool.has_item("greeting")?);
///
/// assert!(pool.save_deferred(Item::hit("a", "1".to_string(), None)?)?);
/// assert!(pool.save_deferred(Item::hit("b", "2".to_string(), None)?)?);
/// assert!(pool.commit());
///
/// assert!(pool.delete_items(["a", "b"])?);
/// assert!(!pool.delete_items(["a", "greeting"])?);
/// assert!(!pool.has_item("greeting")?);
/// # Ok::<(), cachepool::error::InvalidArgument>(())
/// ```
pub trait Pool {
    /// Payload type of the items this pool holds.
    type Value: 'static;

    /// Fetches the item stored under `key`, or a fresh miss.
    fn get_item(&self, key: &str) -> Result<Item<Self::Value>>;

    /// Drops every stored item.
    fn clear(&mut self) -> bool;

    /// Deletes the item stored under `key`.
    fn delete_item(&mut self, key: &str) -> Result<bool>;

    /// Persists `item` under its own key.
    ///
    /// Fails with [`InvalidArgument::ForeignItem`](crate::error::InvalidArgument::ForeignItem)
    /// if `item` is not an expiring [`Item`].
    fn save<I>(&mut self, item: I) -> Result<bool>
    where
        I: CacheItem<Value = Self::Value> + 'static;

    /// The buffer backing [`save_deferred`](Self::save_deferred) and
    /// [`commit`](Self::commit).
    ///
    /// Implementors own one [`DeferredItems`] and return it here. Outside
    /// this crate the buffer can only be inspected; `save_deferred` and
    /// `commit` are the only ways to change it.
    fn deferred_items(&mut self) -> &mut DeferredItems<Self::Value>;

    /// Lazily fetches one item per key, in key order.
    fn get_items<K>(&self, keys: K) -> GetItems<'_, Self, K::IntoIter>
    where
        K: IntoIterator,
        K::Item: AsRef<str>,
    {
        GetItems {
            pool: self,
            keys: keys.into_iter(),
        }
    }

    /// `true` if `key` is currently a hit.
    fn has_item(&self, key: &str) -> Result<bool> {
        Ok(self.get_item(key)?.is_hit())
    }

    /// Deletes every key; `true` only if every deletion succeeded.
    ///
    /// All keys are validated before the first deletion. After that every key
    /// is attempted, even once one has failed.
    fn delete_items<K>(&mut self, keys: K) -> Result<bool>
    where
        K: IntoIterator,
        K::Item: AsRef<str>,
    {
        let keys = keys
            .into_iter()
            .map(|key| validate_key(key.as_ref()).map(|()| key))
            .collect::<Result<Vec<_>>>()?;

        let mut failed = 0usize;
        for key in &keys {
            if !self.delete_item(key.as_ref())? {
                failed += 1;
            }
        }
        if failed > 0 {
            debug!(keys = keys.len(), failed, "batch delete incomplete");
        }
        Ok(failed == 0)
    }

    /// Queues `item` for the next [`commit`](Self::commit).
    ///
    /// Returns `false` if this very item (or a clone of it) is already
    /// queued; the queued copy is then replaced by `item` in place, so the
    /// latest state is what gets committed.
    fn save_deferred<I>(&mut self, item: I) -> Result<bool>
    where
        I: CacheItem<Value = Self::Value> + 'static,
    {
        let item = filter_item(item)?;
        Ok(self.deferred_items().push(item))
    }

    /// Saves every queued item in order; `true` only if every save succeeded.
    ///
    /// The buffer is empty afterwards, whatever the outcome.
    fn commit(&mut self) -> bool {
        let pending = self.deferred_items().take();
        let count = pending.len();
        let mut success = true;
        for item in pending {
            match self.save(item) {
                Ok(saved) => success &= saved,
                Err(err) => {
                    warn!(%err, "deferred item rejected on commit");
                    success = false;
                },
            }
        }
        debug!(count, success, "committed deferred items");
        success
    }
}

impl<P> Pool for &mut P
where
    P: Pool + ?Sized,
{
    type Value = P::Value;

    fn get_item(&self, key: &str) -> Result<Item<Self::Value>> {
        (**self).get_item(key)
    }

    fn clear(&mut self) -> bool {
        (**self).clear()
    }

    fn delete_item(&mut self, key: &str) -> Result<bool> {
        (**self).delete_item(key)
    }

    fn save<I>(&mut self, item: I) -> Result<bool>
    where
        I: CacheItem<Value = Self::Value> + 'static,
    {
        (**self).save(item)
    }

    fn deferred_items(&mut self) -> &mut DeferredItems<Self::Value> {
        (**self).deferred_items()
    }

    fn has_item(&self, key: &str) -> Result<bool> {
        (**self).has_item(key)
    }

    fn delete_items<K>(&mut self, keys: K) -> Result<bool>
    where
        K: IntoIterator,
        K::Item: AsRef<str>,
    {
        (**self).delete_items(keys)
    }

    fn save_deferred<I>(&mut self, item: I) -> Result<bool>
    where
        I: CacheItem<Value = Self::Value> + 'static,
    {
        (**self).save_deferred(item)
    }

    fn commit(&mut self) -> bool {
        (**self).commit()
    }
}

/// Lazy per-key fetch returned by [`Pool::get_items`].
///
/// Yields one `get_item` result per key, in input order. Consumed once;
/// call `get_items` again with the same keys to start over.
#[derive(Debug)]
pub struct GetItems<'a, P: ?Sized, I> {
    pool: &'a P,
    keys: I,
}

impl<P, I> Iterator for GetItems<'_, P, I>
where
    P: Pool + ?Sized,
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = Result<Item<P::Value>>;

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.keys.next()?;
        Some(self.pool.get_item(key.as_ref()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}
