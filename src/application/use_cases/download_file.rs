use std::sync::Arc;
use thiserror::Error;

use crate::application::ports::{FileReader, FileStore, StorageError};
use crate::domain::value_objects::{FileId, StoredFile};

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(StorageError),
}

impl From<StorageError> for DownloadError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(id) => DownloadError::NotFound(id),
            other => DownloadError::Storage(other),
        }
    }
}

/// Use case: stream a stored blob back to the client
pub struct DownloadFileUseCase {
    file_store: Arc<dyn FileStore>,
}

impl DownloadFileUseCase {
    pub fn new(file_store: Arc<dyn FileStore>) -> Self {
        Self { file_store }
    }

    pub async fn execute(&self, id: FileId) -> Result<(StoredFile, FileReader), DownloadError> {
        Ok(self.file_store.open(&id).await?)
    }
}
