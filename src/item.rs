//! The cache item value type.
//!
//! ## Architecture
//!
//! An [`Item`] is a plain value exchanged between callers and pools. It never
//! references pool storage: a pool hands out copies and stores whatever copy
//! it is given back.
//!
//! ```text
//!   Item<V>
//!   ├── key              validated once, immutable afterwards
//!   ├── value            Option<V>; only meaningful together with `hit`
//!   ├── expiration_time  absolute; None = never expires
//!   ├── hit              true = present, false = placeholder for a miss
//!   └── identity         shared by clones, fresh for every constructed item
//! ```
//!
//! Expiration is stored as an absolute timestamp, so comparing it against
//! "now" is left to whichever pool enforces expiry. Items run no timers.
//!
//! ## Identity
//!
//! Deferred saves deduplicate by identity, not by key. Cloning an item keeps
//! its identity (the clone is the same item); every constructor call,
//! including every fresh miss a pool produces, creates a new one. Value
//! equality (`==`) ignores identity.
//!
//! ## Example Usage
//!
//! ```
//! use cachepool::item::{Item, Ttl};
//! use cachepool::traits::{CacheItem, ExpiringItem};
//!
//! let mut item = Item::miss("session.42")?;
//! assert!(!item.is_hit());
//!
//! item.expires_after(Some(Ttl::Seconds(60)))?.set("payload".to_string());
//! assert!(item.is_hit());
//! assert_eq!(item.get(), Some(&"payload".to_string()));
//! assert!(item.expiration_time().is_some());
//! # Ok::<(), cachepool::error::InvalidArgument>(())
//! ```

use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::{InvalidArgument, Result};
use crate::key::validate_key;
use crate::traits::{CacheItem, ExpiringItem};

// ---------------------------------------------------------------------------
// Ttl / Expiration
// ---------------------------------------------------------------------------

/// Relative lifetime accepted by [`CacheItem::expires_after`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ttl {
    /// Whole seconds from now. Negative values produce an expiration in the past.
    Seconds(i64),
    /// A structured duration from now.
    Delta(TimeDelta),
}

impl Ttl {
    /// Computes the absolute expiration `now + self`.
    ///
    /// Fails with [`InvalidArgument::ExpirationOutOfRange`] when the result
    /// does not fit into a `DateTime<Utc>`.
    pub fn expiration_from(self, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        let delta = match self {
            Ttl::Seconds(secs) => TimeDelta::try_seconds(secs),
            Ttl::Delta(delta) => Some(delta),
        };
        delta
            .and_then(|delta| now.checked_add_signed(delta))
            .ok_or(InvalidArgument::ExpirationOutOfRange)
    }
}

impl From<i64> for Ttl {
    fn from(secs: i64) -> Self {
        Ttl::Seconds(secs)
    }
}

impl From<TimeDelta> for Ttl {
    fn from(delta: TimeDelta) -> Self {
        Ttl::Delta(delta)
    }
}

impl TryFrom<std::time::Duration> for Ttl {
    type Error = InvalidArgument;

    fn try_from(duration: std::time::Duration) -> Result<Self> {
        TimeDelta::from_std(duration)
            .map(Ttl::Delta)
            .map_err(|_| InvalidArgument::ExpirationOutOfRange)
    }
}

/// Any expiration a key/value caller may pass: absolute or relative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiration {
    /// Expire at this absolute instant.
    At(DateTime<Utc>),
    /// Expire after this lifetime, measured from the moment it is applied.
    After(Ttl),
}

impl Expiration {
    /// Shorthand for `Expiration::After(Ttl::Seconds(secs))`.
    pub fn after_secs(secs: i64) -> Self {
        Expiration::After(Ttl::Seconds(secs))
    }
}

impl From<DateTime<Utc>> for Expiration {
    fn from(at: DateTime<Utc>) -> Self {
        Expiration::At(at)
    }
}

impl From<Ttl> for Expiration {
    fn from(ttl: Ttl) -> Self {
        Expiration::After(ttl)
    }
}

impl From<i64> for Expiration {
    fn from(secs: i64) -> Self {
        Expiration::After(Ttl::Seconds(secs))
    }
}

impl From<TimeDelta> for Expiration {
    fn from(delta: TimeDelta) -> Self {
        Expiration::After(Ttl::Delta(delta))
    }
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Allocation-backed identity token; clones compare equal by pointer.
#[derive(Clone)]
struct Identity(Arc<()>);

impl Identity {
    fn new() -> Self {
        Self(Arc::new(()))
    }

    fn same_as(&self, other: &Identity) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:p}", Arc::as_ptr(&self.0))
    }
}

// ---------------------------------------------------------------------------
// Item
// ---------------------------------------------------------------------------

/// A single cache entry: key, value, expiration and hit flag.
#[derive(Debug, Clone)]
pub struct Item<V> {
    key: String,
    value: Option<V>,
    expiration_time: Option<DateTime<Utc>>,
    hit: bool,
    identity: Identity,
}

impl<V> Item<V> {
    /// Creates a hit item with no value and no expiration.
    pub fn new(key: impl Into<String>) -> Result<Self> {
        Self::with_parts(key, None, None, true)
    }

    /// Creates an item from all of its parts.
    ///
    /// The hit flag is taken verbatim; it does not depend on `value`.
    pub fn with_parts(
        key: impl Into<String>,
        value: Option<V>,
        expiration_time: Option<DateTime<Utc>>,
        hit: bool,
    ) -> Result<Self> {
        let key = key.into();
        validate_key(&key)?;
        Ok(Self {
            key,
            value,
            expiration_time,
            hit,
            identity: Identity::new(),
        })
    }

    /// Creates a hit item holding `value`.
    pub fn hit(
        key: impl Into<String>,
        value: V,
        expiration_time: Option<DateTime<Utc>>,
    ) -> Result<Self> {
        Self::with_parts(key, Some(value), expiration_time, true)
    }

    /// Creates a miss: no value, no expiration, `is_hit() == false`.
    pub fn miss(key: impl Into<String>) -> Result<Self> {
        Self::with_parts(key, None, None, false)
    }

    /// Consumes the item and returns its value.
    pub fn into_value(self) -> Option<V> {
        self.value
    }

    /// Returns `true` if `other` is this item or a clone of it.
    pub fn is_same_item(&self, other: &Item<V>) -> bool {
        self.identity.same_as(&other.identity)
    }
}

impl<V: PartialEq> PartialEq for Item<V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
            && self.value == other.value
            && self.expiration_time == other.expiration_time
            && self.hit == other.hit
    }
}

impl<V: Eq> Eq for Item<V> {}

impl<V> CacheItem for Item<V> {
    type Value = V;

    fn key(&self) -> &str {
        &self.key
    }

    fn get(&self) -> Option<&V> {
        self.value.as_ref()
    }

    fn set(&mut self, value: V) -> &mut Self {
        self.value = Some(value);
        self.hit = true;
        self
    }

    fn is_hit(&self) -> bool {
        self.hit
    }

    fn expires_at(&mut self, expiration: Option<DateTime<Utc>>) -> &mut Self {
        self.expiration_time = expiration;
        self
    }

    fn expires_after(&mut self, ttl: Option<Ttl>) -> Result<&mut Self> {
        self.expiration_time = match ttl {
            Some(ttl) => Some(ttl.expiration_from(Utc::now())?),
            None => None,
        };
        Ok(self)
    }
}

impl<V> ExpiringItem for Item<V> {
    fn expiration_time(&self) -> Option<DateTime<Utc>> {
        self.expiration_time
    }
}

/// Accepts `item` only if it is the expiring [`Item`] pools store.
///
/// Other [`CacheItem`] implementations cannot report an expiration time and
/// are rejected with [`InvalidArgument::ForeignItem`].
pub(crate) fn filter_item<I>(item: I) -> Result<Item<I::Value>>
where
    I: CacheItem + 'static,
    I::Value: 'static,
{
    let mut slot = Some(item);
    (&mut slot as &mut dyn Any)
        .downcast_mut::<Option<Item<I::Value>>>()
        .and_then(Option::take)
        .ok_or(InvalidArgument::ForeignItem {
            found: type_name::<I>(),
        })
}
