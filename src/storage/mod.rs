//! Persistence backends.
//!
//! The store reads and writes its whole collection as a single named JSON
//! blob through `StorageBackend`. Backends are interchangeable: an in-memory
//! map for tests and embedding, or one file per key on disk.

use async_trait::async_trait;

use crate::types::errors::StorageError;

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Asynchronous key-blob storage.
///
/// `get` returns `None` for a key that has never been written. `set`
/// replaces the whole value for a key in one write; there are no partial or
/// incremental updates.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// A shared backend is a backend; independent call sites (and tests) can
/// each hold a handle to the same storage.
#[async_trait]
impl<B: StorageBackend + ?Sized> StorageBackend for std::sync::Arc<B> {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value).await
    }
}
