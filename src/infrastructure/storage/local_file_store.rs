use async_trait::async_trait;
use bytes::Bytes;
use sha2::{Digest, Sha256};
use tokio::fs::{self, File};
use tokio::io::{AsyncWriteExt, BufReader};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::application::ports::{FileReader, FileStore, StorageError};
use crate::domain::value_objects::{FileId, StoredFile};
use crate::infrastructure::storage::PathBuilder;

/// Local filesystem blob store.
///
/// Writes go to a temp file first and are moved into their sharded final
/// location with an atomic rename, so a crash never leaves a partially
/// written blob at a final path. A small JSON sidecar next to each blob
/// carries the receipt (filename, MIME type, size, digest).
pub struct LocalFileStore {
    paths: PathBuilder,
    durable_writes: bool,
}

impl LocalFileStore {
    pub fn new(root: std::path::PathBuf) -> Self {
        Self::with_durability(root, true)
    }

    pub fn with_durability(root: std::path::PathBuf, durable_writes: bool) -> Self {
        Self {
            paths: PathBuilder::new(root),
            durable_writes,
        }
    }

    /// Initialize storage directories
    pub async fn init(&self) -> Result<(), StorageError> {
        fs::create_dir_all(self.paths.root().join("temp")).await?;
        fs::create_dir_all(self.paths.root().join("files")).await?;
        Ok(())
    }

    async fn write_temp(&self, path: &std::path::Path, bytes: &Bytes) -> Result<(), StorageError> {
        let mut file = File::create(path).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        if self.durable_writes {
            file.sync_all().await?;
        }
        Ok(())
    }

    async fn read_sidecar(&self, id: &FileId) -> Result<StoredFile, StorageError> {
        let sidecar_path = self.paths.sidecar_path(id);
        let raw = fs::read(&sidecar_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound(id.to_string())
            } else {
                StorageError::Io(e)
            }
        })?;
        serde_json::from_slice(&raw)
            .map_err(|e| StorageError::Internal(format!("corrupt sidecar for {}: {}", id, e)))
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn store(
        &self,
        bytes: Bytes,
        filename: &str,
        mime_type: &str,
    ) -> Result<StoredFile, StorageError> {
        let id = FileId::new();

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let sha256 = hex::encode(hasher.finalize());

        let temp_path = self.paths.temp_path(Uuid::new_v4());
        debug!("Writing blob to temp file: {:?}", temp_path);
        if let Err(e) = self.write_temp(&temp_path, &bytes).await {
            warn!("Failed to write blob to temp file {:?}: {}", temp_path, e);
            let _ = fs::remove_file(&temp_path).await;
            return Err(e);
        }

        let receipt = StoredFile {
            id,
            filename: filename.to_string(),
            mime_type: mime_type.to_string(),
            size_bytes: bytes.len() as u64,
            sha256,
        };

        let final_path = self.paths.blob_path(&id);
        if let Some(parent) = final_path.parent() {
            if let Err(e) = fs::create_dir_all(parent).await {
                let _ = fs::remove_file(&temp_path).await;
                return Err(StorageError::Io(e));
            }
        }

        // Atomic rename into the final location
        if let Err(e) = fs::rename(&temp_path, &final_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(StorageError::Io(e));
        }

        let sidecar = serde_json::to_vec(&receipt)
            .map_err(|e| StorageError::Internal(format!("serialize sidecar: {}", e)))?;
        if let Err(e) = fs::write(self.paths.sidecar_path(&id), sidecar).await {
            // Without its sidecar the blob is unreadable; roll it back
            let _ = fs::remove_file(&final_path).await;
            return Err(StorageError::Io(e));
        }

        if self.durable_writes {
            if let Some(parent) = final_path.parent() {
                match File::open(parent).await {
                    Ok(dir) => {
                        if let Err(e) = dir.sync_all().await {
                            warn!("Failed to sync parent directory after rename: {}", e);
                        }
                    }
                    Err(e) => {
                        warn!("Failed to open parent directory for sync: {}", e);
                    }
                }
            }
        }

        debug!(
            "Blob stored: id={}, size={}, sha256={}",
            receipt.id, receipt.size_bytes, receipt.sha256
        );
        Ok(receipt)
    }

    async fn open(&self, id: &FileId) -> Result<(StoredFile, FileReader), StorageError> {
        let receipt = self.read_sidecar(id).await?;
        let path = self.paths.blob_path(id);

        let file = File::open(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound(id.to_string())
            } else {
                StorageError::Io(e)
            }
        })?;

        Ok((receipt, Box::pin(BufReader::new(file))))
    }

    async fn delete(&self, id: &FileId) -> Result<(), StorageError> {
        let path = self.paths.blob_path(id);

        fs::remove_file(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound(id.to_string())
            } else {
                StorageError::Io(e)
            }
        })?;

        // Sidecar removal is best-effort once the blob is gone
        let _ = fs::remove_file(self.paths.sidecar_path(id)).await;

        Ok(())
    }

    async fn exists(&self, id: &FileId) -> Result<bool, StorageError> {
        Ok(fs::metadata(self.paths.blob_path(id)).await.is_ok())
    }
}
