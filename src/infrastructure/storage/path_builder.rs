use std::path::PathBuf;

use crate::domain::value_objects::FileId;

/// Utility for generating blob storage paths
pub struct PathBuilder {
    root: PathBuf,
}

impl PathBuilder {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    /// Temp upload path: /root/temp/{uuid}
    pub fn temp_path(&self, id: uuid::Uuid) -> PathBuf {
        self.root.join("temp").join(id.to_string())
    }

    /// Final blob path: /root/files/{shard}/{id}
    pub fn blob_path(&self, id: &FileId) -> PathBuf {
        self.root
            .join("files")
            .join(id.shard_prefix())
            .join(id.to_string())
    }

    /// Metadata sidecar path: /root/files/{shard}/{id}.meta
    pub fn sidecar_path(&self, id: &FileId) -> PathBuf {
        let mut path = self.blob_path(id);
        path.set_extension("meta");
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_and_sidecar_share_shard_directory() {
        let builder = PathBuilder::new(PathBuf::from("/data"));
        let id = FileId::new();

        let blob = builder.blob_path(&id);
        let sidecar = builder.sidecar_path(&id);

        assert_eq!(blob.parent(), sidecar.parent());
        assert!(blob.starts_with("/data/files"));
        assert_eq!(sidecar.extension().unwrap(), "meta");
    }
}
