//! # Storage Error Types
//!
//! Errors raised while reading or writing a cart blob.
//!
//! These never cross the `CartStore` boundary: `load` turns them into an
//! empty cart and `save` logs them. They exist so the adapter and its tests
//! can tell *why* a blob was discarded.

use storefront_db::DbError;
use thiserror::Error;

/// Cart storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem failure (file slots).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Blob is not valid cart JSON.
    #[error("Malformed cart blob: {0}")]
    Json(#[from] serde_json::Error),

    /// SQLite slot failure.
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    /// Backend-specific failure (e.g. poisoned in-memory lock).
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// The background save queue has stopped.
    #[error("Save queue is closed")]
    QueueClosed,

    /// Invalid cart configuration.
    #[error("Invalid cart configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for cart storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
