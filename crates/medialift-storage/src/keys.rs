//! Shared key validation and URL construction for storage backends.

use crate::{StorageError, StorageResult};

/// Reject keys that are empty, absolute or contain `.` / `..` segments.
///
/// URL parsers collapse dot segments, so such keys would resolve to a
/// different object than the one stored.
pub fn validate_key(storage_key: &str) -> StorageResult<()> {
    if storage_key.is_empty() {
        return Err(StorageError::InvalidKey("Storage key is empty".to_string()));
    }
    if storage_key.starts_with('/')
        || storage_key
            .split('/')
            .any(|segment| segment == "." || segment == "..")
    {
        return Err(StorageError::InvalidKey(format!(
            "Storage key contains invalid characters: {}",
            storage_key
        )));
    }
    Ok(())
}

/// Percent-encode each segment of a key, keeping the `/` separators.
pub fn encode_key(storage_key: &str) -> String {
    storage_key
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Join a base URL and a key without doubling slashes.
pub fn join_url(base_url: &str, storage_key: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), encode_key(storage_key))
}
