//! Cache key validation.
//!
//! A valid key is 1 to [`MAX_KEY_LEN`] characters drawn from
//! `[a-zA-Z0-9._]`. Keys are never normalized: anything else is rejected
//! with [`InvalidArgument`].

use crate::error::{InvalidArgument, Result};

/// Maximum key length in bytes. Valid keys are ASCII, so bytes == characters.
pub const MAX_KEY_LEN: usize = 64;

/// Returns `true` if `byte` may appear in a cache key.
#[inline]
fn is_key_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'.' || byte == b'_'
}

/// Validates `key` against the key format.
///
/// Checks run in order: empty, too long, charset.
///
/// # Example
///
/// ```
/// use cachepool::error::InvalidArgument;
/// use cachepool::key::validate_key;
///
/// assert!(validate_key("user.42_profile").is_ok());
/// assert_eq!(validate_key(""), Err(InvalidArgument::EmptyKey));
/// assert!(validate_key("some-key").is_err());
/// ```
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(InvalidArgument::EmptyKey);
    }
    if key.len() > MAX_KEY_LEN {
        return Err(InvalidArgument::KeyTooLong { len: key.len() });
    }
    if !key.bytes().all(is_key_byte) {
        return Err(InvalidArgument::InvalidKeyCharacters {
            key: key.to_owned(),
        });
    }
    Ok(())
}

/// Returns `true` if `key` passes [`validate_key`].
#[inline]
pub fn is_valid_key(key: &str) -> bool {
    validate_key(key).is_ok()
}
