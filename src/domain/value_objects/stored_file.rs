use serde::{Deserialize, Serialize};

use super::FileId;

/// Receipt for a blob durably written to the file store.
///
/// The sha256 digest is computed while streaming the upload to disk and is
/// re-checkable on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFile {
    pub id: FileId,
    pub filename: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub sha256: String,
}
