//! Storage key generation.
//!
//! Keys are built in two steps: [`generate_key`] appends a random token to a
//! caller prefix, and [`finalize_key`] appends the sniffed extension once the
//! content is known.

use uuid::Uuid;

/// Length of the random token appended by [`generate_key`].
pub const TOKEN_LEN: usize = 32;

/// `prefix` followed by a fresh 32-character lowercase hex token.
///
/// The prefix is kept verbatim, so `generate_key("images/profile_pictures/")`
/// yields `images/profile_pictures/3f2a...`.
pub fn generate_key(prefix: &str) -> String {
    format!("{}{}", prefix, Uuid::new_v4().simple())
}

/// `key.extension`
pub fn finalize_key(key: &str, extension: &str) -> String {
    format!("{}.{}", key, extension)
}
