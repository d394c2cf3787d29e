use std::sync::Arc;
use thiserror::Error;

use crate::application::dto::{CreateInformationRequest, InformationDto};
use crate::application::ports::{
    CategoryRepository, FileStore, InformationRepository, RepositoryError, StorageError,
};
use crate::domain::authorization::ActorContext;
use crate::domain::entities::Information;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::CategoryId;

#[derive(Debug, Error)]
pub enum CreateError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Category not found or inactive: {0}")]
    InvalidCategory(CategoryId),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Use case: create an information item in DRAFT state.
///
/// Media kinds store their upload before the row is inserted so the item
/// never references a missing blob.
pub struct CreateInformationUseCase {
    information_repo: Arc<dyn InformationRepository>,
    category_repo: Arc<dyn CategoryRepository>,
    file_store: Arc<dyn FileStore>,
}

impl CreateInformationUseCase {
    pub fn new(
        information_repo: Arc<dyn InformationRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        file_store: Arc<dyn FileStore>,
    ) -> Self {
        Self {
            information_repo,
            category_repo,
            file_store,
        }
    }

    pub async fn execute(
        &self,
        request: CreateInformationRequest,
        actor: &ActorContext,
    ) -> Result<InformationDto, CreateError> {
        match self.category_repo.find_by_id(&request.category_id).await? {
            Some(category) if category.is_active() => {}
            _ => return Err(CreateError::InvalidCategory(request.category_id)),
        }

        let file_id = if request.kind.is_media() {
            let upload = request.file.as_ref().ok_or_else(|| {
                CreateError::InvalidRequest(format!("{} content requires a file", request.kind))
            })?;
            if !request.kind.accepts_mime(&upload.mime_type) {
                return Err(CreateError::InvalidRequest(format!(
                    "file type {} does not match {} content",
                    upload.mime_type, request.kind
                )));
            }
            let stored = self
                .file_store
                .store(upload.bytes.clone(), &upload.filename, &upload.mime_type)
                .await?;
            Some(stored.id)
        } else {
            None
        };

        let item = Information::new(
            request.title,
            request.description,
            request.kind,
            request.content,
            request.category_id,
            file_id,
            *actor.user_id(),
        )?;

        self.information_repo.insert(&item).await?;

        Ok(InformationDto::from(item))
    }
}
