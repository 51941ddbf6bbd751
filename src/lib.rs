//! cachepool: item-oriented cache pools with a key/value facade.
//!
//! A [`Pool`](traits::Pool) hands out [`Item`](item::Item)s by key; callers
//! mutate them and save them back, directly or through a deferred buffer
//! flushed by `commit`. [`PoolCache`](cache::PoolCache) layers plain
//! get/set/delete on top of any pool.
//!
//! ```rust
//! use cachepool::prelude::*;
//!
//! let mut pool = RuntimePool::<&str>::new();
//! let mut item = pool.get_item("user.42")?;
//! assert!(!item.is_hit());
//!
//! item.set("Ada").expires_after(Some(Ttl::Seconds(60)))?;
//! pool.save(item)?;
//! assert!(pool.has_item("user.42")?);
//! # Ok::<(), InvalidArgument>(())
//! ```

pub mod builder;
pub mod cache;
pub mod error;
pub mod item;
pub mod key;
pub mod metrics;
pub mod pool;
pub mod prelude;
pub mod traits;
