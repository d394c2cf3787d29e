use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

use crate::application::ports::{FileStore, InformationRepository, RepositoryError};
use crate::domain::authorization::ActorContext;
use crate::domain::value_objects::ContentId;

#[derive(Debug, Error)]
pub enum DeleteError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Access denied")]
    AccessDenied,

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Use case: delete an information item.
///
/// The row goes first; the blob delete afterwards is best-effort, same as
/// the file-replacement cleanup.
pub struct DeleteInformationUseCase {
    information_repo: Arc<dyn InformationRepository>,
    file_store: Arc<dyn FileStore>,
}

impl DeleteInformationUseCase {
    pub fn new(
        information_repo: Arc<dyn InformationRepository>,
        file_store: Arc<dyn FileStore>,
    ) -> Self {
        Self {
            information_repo,
            file_store,
        }
    }

    pub async fn execute(&self, id: ContentId, actor: &ActorContext) -> Result<(), DeleteError> {
        let entity = self
            .information_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| DeleteError::NotFound(id.to_string()))?;

        if !actor.can_manage(entity.author_id()) {
            return Err(DeleteError::AccessDenied);
        }

        let file_id = entity.file_id().copied();
        self.information_repo.delete(&id).await?;

        if let Some(file_id) = file_id {
            if let Err(e) = self.file_store.delete(&file_id).await {
                warn!("Failed to delete file {} for removed item {}: {}", file_id, id, e);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockFileStore, MockInformationRepository, StorageError};
    use crate::domain::entities::Information;
    use crate::domain::value_objects::{CategoryId, ContentKind, FileId, UserId};

    fn image_entity(author: UserId, file_id: FileId) -> Information {
        Information::new(
            "Photo".to_string(),
            "A photo".to_string(),
            ContentKind::Image,
            None,
            CategoryId::new(),
            Some(file_id),
            author,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_delete_removes_row_and_attempts_blob_cleanup() {
        let author = UserId::new();
        let file_id = FileId::new();
        let entity = image_entity(author, file_id);

        let mut repo = MockInformationRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(entity.clone())));
        repo.expect_delete().times(1).returning(|_| Ok(()));

        let mut file_store = MockFileStore::new();
        file_store
            .expect_delete()
            .times(1)
            .withf(move |id| *id == file_id)
            .returning(|_| Err(StorageError::Internal("unreachable volume".to_string())));

        let use_case = DeleteInformationUseCase::new(Arc::new(repo), Arc::new(file_store));

        // Blob delete failure does not fail the operation
        assert!(use_case
            .execute(ContentId::new(), &ActorContext::contributor(author))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_delete_denied_for_non_author() {
        let entity = image_entity(UserId::new(), FileId::new());

        let mut repo = MockInformationRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(entity.clone())));
        repo.expect_delete().never();

        let use_case =
            DeleteInformationUseCase::new(Arc::new(repo), Arc::new(MockFileStore::new()));

        let err = use_case
            .execute(ContentId::new(), &ActorContext::contributor(UserId::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, DeleteError::AccessDenied));
    }
}
