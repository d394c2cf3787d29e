use async_trait::async_trait;
use thiserror::Error;

use crate::application::dto::InformationFilter;
use crate::application::update::UpdateFieldSet;
use crate::domain::entities::Information;
use crate::domain::value_objects::ContentId;
#[cfg(test)]
use mockall::{automock, predicate::*};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Port for information persistence operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait InformationRepository: Send + Sync {
    /// Insert a freshly created item
    async fn insert(&self, item: &Information) -> Result<(), RepositoryError>;

    /// Find item by ID
    async fn find_by_id(&self, id: &ContentId) -> Result<Option<Information>, RepositoryError>;

    /// List items matching the filter, newest first
    async fn list(&self, filter: &InformationFilter) -> Result<Vec<Information>, RepositoryError>;

    /// Atomically apply a computed field set to one row and return the
    /// updated item; None when the row vanished underneath us
    async fn update_fields(
        &self,
        id: &ContentId,
        fields: &UpdateFieldSet,
    ) -> Result<Option<Information>, RepositoryError>;

    /// Hard delete
    async fn delete(&self, id: &ContentId) -> Result<(), RepositoryError>;
}
