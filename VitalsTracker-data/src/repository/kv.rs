use std::fmt::Debug;

use super::errors::PersistenceError;

/// Default quota for keys plus values, in bytes
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Synchronous string key-value store with get/set semantics.
///
/// Implementations must leave the previous value untouched when `set_item`
/// fails.
pub trait KeyValueStore: Send + Sync + Debug {
    /// Read the value stored under `key`
    fn get_item(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Store `value` under `key`, replacing any previous value
    fn set_item(&self, key: &str, value: &str) -> Result<(), PersistenceError>;

    /// Human-readable description of the backend, used by health checks
    fn describe(&self) -> String;
}

/// Check that replacing `key` with `value` keeps the store within `quota`.
///
/// `other_bytes` is the size of every other entry (keys and values) already
/// held by the store.
pub(crate) fn check_quota(
    other_bytes: usize,
    key: &str,
    value: &str,
    quota: usize,
) -> Result<(), PersistenceError> {
    let required = other_bytes + key.len() + value.len();
    if required > quota {
        return Err(PersistenceError::QuotaExceeded { required, quota });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_quota_boundary() {
        assert!(check_quota(0, "key", "value", 8).is_ok());

        let err = check_quota(1, "key", "value", 8).unwrap_err();
        match err {
            PersistenceError::QuotaExceeded { required, quota } => {
                assert_eq!(required, 9);
                assert_eq!(quota, 8);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
