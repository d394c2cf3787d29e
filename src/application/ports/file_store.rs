use async_trait::async_trait;
use bytes::Bytes;
#[cfg(test)]
use mockall::{automock, predicate::*};
use std::pin::Pin;
use thiserror::Error;
use tokio::io::AsyncRead;

use crate::domain::value_objects::{FileId, StoredFile};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Integrity check failed: expected {expected}, got {actual}")]
    IntegrityMismatch { expected: String, actual: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Type alias for an async blob reader
pub type FileReader = Pin<Box<dyn AsyncRead + Send>>;

/// Port for physical blob storage operations.
///
/// `store` must only return once the bytes are durable; the merge policy's
/// store-before-delete ordering relies on it.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Durably write a blob and return its receipt
    async fn store(
        &self,
        bytes: Bytes,
        filename: &str,
        mime_type: &str,
    ) -> Result<StoredFile, StorageError>;

    /// Open a stored blob for streaming, with its receipt
    async fn open(&self, id: &FileId) -> Result<(StoredFile, FileReader), StorageError>;

    /// Delete a stored blob; may reject
    async fn delete(&self, id: &FileId) -> Result<(), StorageError>;

    /// Check whether a blob exists
    async fn exists(&self, id: &FileId) -> Result<bool, StorageError>;
}
