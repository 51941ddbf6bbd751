//! Pool implementations.
//!
//! - [`null::NullPool`]: always misses, always succeeds.
//! - [`runtime::RuntimePool`]: in-process hash map.
//! - [`shared::SharedPool`]: `RwLock`-guarded handle over any pool
//!   (feature `concurrency`).
//! - [`deferred::DeferredItems`]: the deferred-save buffer every pool owns.

pub mod deferred;
pub mod null;
pub mod runtime;

#[cfg(feature = "concurrency")]
pub mod shared;
