pub use crate::builder::{
    AnyPool, PoolBuilder, PoolKind, item, item_hit, item_miss, null_pool, pool_cache, runtime_pool,
};
pub use crate::cache::PoolCache;
pub use crate::error::{InvalidArgument, Result};
pub use crate::item::{Expiration, Item, Ttl};
pub use crate::key::{MAX_KEY_LEN, is_valid_key, validate_key};
pub use crate::metrics::PoolMetrics;
pub use crate::pool::deferred::DeferredItems;
pub use crate::pool::null::NullPool;
pub use crate::pool::runtime::{ExpiryPolicy, RuntimePool};
#[cfg(feature = "concurrency")]
pub use crate::pool::shared::SharedPool;
pub use crate::traits::{CacheItem, ExpiringItem, GetItems, Pool};
