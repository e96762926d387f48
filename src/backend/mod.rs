//! Key-value string storage underneath the record store.
//!
//! The record store only needs whole-value get/set/remove on string keys,
//! which is the browser `localStorage` contract. Two implementations:
//! - [`MemoryBackend`]: isolated, in-process, for tests and ephemeral use
//! - [`FileBackend`]: one checksummed file per key in a locked directory

mod file;
mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

use crate::error::Result;

/// Whole-value string storage keyed by name.
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, or `None` if it was never set.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is a no-op.
    fn remove(&self, key: &str) -> Result<()>;

    /// Whether `key` holds a value.
    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}
