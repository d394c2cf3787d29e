use async_trait::async_trait;

use super::information_repository::RepositoryError;
use crate::application::dto::ActivityFilter;
use crate::application::update::UpdateFieldSet;
use crate::domain::entities::Activity;
use crate::domain::value_objects::ContentId;
#[cfg(test)]
use mockall::{automock, predicate::*};

/// Port for activity persistence operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    async fn insert(&self, activity: &Activity) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &ContentId) -> Result<Option<Activity>, RepositoryError>;

    async fn list(&self, filter: &ActivityFilter) -> Result<Vec<Activity>, RepositoryError>;

    /// Atomically apply a computed field set to one row
    async fn update_fields(
        &self,
        id: &ContentId,
        fields: &UpdateFieldSet,
    ) -> Result<Option<Activity>, RepositoryError>;

    async fn delete(&self, id: &ContentId) -> Result<(), RepositoryError>;
}
