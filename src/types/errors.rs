use std::fmt;

// === StoreError ===

/// Errors related to path bookmark store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Attempted to save the bare root path.
    RootPath,
    /// An explicit name was required but blank after trimming.
    EmptyName,
    /// No record with the given ID exists.
    NotFound(i64),
    /// Import payload was not a sequence of record-shaped values.
    InvalidFormat(String),
    /// The persistence backend failed to read or write.
    Persistence(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::RootPath => write!(f, "Cannot save root path"),
            StoreError::EmptyName => write!(f, "Name cannot be empty"),
            StoreError::NotFound(id) => write!(f, "Path record not found: {}", id),
            StoreError::InvalidFormat(msg) => write!(f, "Invalid import format: {}", msg),
            StoreError::Persistence(msg) => write!(f, "Persistence error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

// === StorageError ===

/// Errors produced by a storage backend.
#[derive(Debug)]
pub enum StorageError {
    /// Reading a value from the backend failed.
    ReadFailed(String),
    /// Writing a value to the backend failed.
    WriteFailed(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::ReadFailed(msg) => write!(f, "Storage read failed: {}", msg),
            StorageError::WriteFailed(msg) => write!(f, "Storage write failed: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}
