use async_trait::async_trait;

use super::information_repository::RepositoryError;
use crate::domain::entities::Category;
use crate::domain::value_objects::CategoryId;
#[cfg(test)]
use mockall::{automock, predicate::*};

/// Port for category lookups and management
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn insert(&self, category: &Category) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &CategoryId) -> Result<Option<Category>, RepositoryError>;

    async fn list(&self) -> Result<Vec<Category>, RepositoryError>;
}
