//! Error types for the cachepool library.
//!
//! ## Key Components
//!
//! - [`InvalidArgument`]: the single error type that crosses the library
//!   boundary. It signals caller misuse (malformed key, out-of-range
//!   expiration, an item the pool cannot store) and is returned immediately,
//!   never retried.
//!
//! Operational outcomes such as "key not found on delete" or "a save inside
//! a commit failed" are not errors; they are reported as `bool` results.
//!
//! ## Example Usage
//!
//! ```
//! use cachepool::error::InvalidArgument;
//! use cachepool::item::Item;
//!
//! let bad = Item::<String>::new("some key");
//! assert!(matches!(bad, Err(InvalidArgument::InvalidKeyCharacters { .. })));
//!
//! let good = Item::<String>::new("some.key");
//! assert!(good.is_ok());
//! ```

use thiserror::Error;

use crate::key::MAX_KEY_LEN;

// ---------------------------------------------------------------------------
// InvalidArgument
// ---------------------------------------------------------------------------

/// Error returned when a caller passes an argument the cache contract rejects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidArgument {
    /// The key was the empty string.
    #[error("cache key can't be empty")]
    EmptyKey,

    /// The key exceeded [`MAX_KEY_LEN`] bytes.
    #[error("cache key can only have up to {max} characters, got {len}", max = MAX_KEY_LEN)]
    KeyTooLong { len: usize },

    /// The key contained a character outside `[a-zA-Z0-9._]`.
    #[error("cache key `{key}` can consist of a-z, A-Z, 0-9, . and _ only")]
    InvalidKeyCharacters { key: String },

    /// `now + ttl` does not fit into the timestamp range.
    #[error("expiration time is out of the representable range")]
    ExpirationOutOfRange,

    /// The item handed to a pool is not the pool's expiring item type.
    #[error("cache item needs to be an expiring `Item`, got `{found}`; foreign items are bound to their own pool")]
    ForeignItem { found: &'static str },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, InvalidArgument>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
