use std::sync::Arc;
use thiserror::Error;

use crate::application::dto::{CategoryDto, CreateCategoryRequest};
use crate::application::ports::{CategoryRepository, RepositoryError};
use crate::domain::authorization::ActorContext;
use crate::domain::entities::Category;
use crate::domain::errors::DomainError;

#[derive(Debug, Error)]
pub enum CategoryError {
    #[error("Access denied")]
    AccessDenied,

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Use case: list all categories
pub struct ListCategoriesUseCase {
    category_repo: Arc<dyn CategoryRepository>,
}

impl ListCategoriesUseCase {
    pub fn new(category_repo: Arc<dyn CategoryRepository>) -> Self {
        Self { category_repo }
    }

    pub async fn execute(&self) -> Result<Vec<CategoryDto>, CategoryError> {
        let categories = self.category_repo.list().await?;
        Ok(categories.into_iter().map(CategoryDto::from).collect())
    }
}

/// Use case: create a category (admin-only)
pub struct CreateCategoryUseCase {
    category_repo: Arc<dyn CategoryRepository>,
}

impl CreateCategoryUseCase {
    pub fn new(category_repo: Arc<dyn CategoryRepository>) -> Self {
        Self { category_repo }
    }

    pub async fn execute(
        &self,
        request: CreateCategoryRequest,
        actor: &ActorContext,
    ) -> Result<CategoryDto, CategoryError> {
        if !actor.is_admin() {
            return Err(CategoryError::AccessDenied);
        }

        let category = Category::new(request.name)?;
        self.category_repo.insert(&category).await?;

        Ok(CategoryDto::from(category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockCategoryRepository;
    use crate::domain::value_objects::UserId;

    #[tokio::test]
    async fn test_create_category_requires_admin() {
        let use_case = CreateCategoryUseCase::new(Arc::new(MockCategoryRepository::new()));

        let err = use_case
            .execute(
                CreateCategoryRequest {
                    name: "News".to_string(),
                },
                &ActorContext::contributor(UserId::new()),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CategoryError::AccessDenied));
    }

    #[tokio::test]
    async fn test_admin_creates_category() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_insert().times(1).returning(|_| Ok(()));

        let use_case = CreateCategoryUseCase::new(Arc::new(repo));
        let dto = use_case
            .execute(
                CreateCategoryRequest {
                    name: "News".to_string(),
                },
                &ActorContext::admin(UserId::new()),
            )
            .await
            .unwrap();
        assert_eq!(dto.name, "News");
        assert!(dto.is_active);
    }
}
