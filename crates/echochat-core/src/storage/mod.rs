//! Key-value storage — the only durable collaborator of the history store.
//!
//! Values are opaque strings addressed by a fixed key. Reads are infallible
//! from the caller's point of view (anything unreadable is `None`); writes
//! replace the whole value and may fail.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::StoreError;

/// Synchronous string key-value storage.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if absent or unreadable.
    fn read(&self, key: &str) -> Option<String>;

    /// Replace the value stored under `key`.
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
