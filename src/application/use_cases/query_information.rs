use std::sync::Arc;
use thiserror::Error;

use crate::application::dto::{InformationDto, InformationFilter, ListResponse};
use crate::application::ports::{InformationRepository, RepositoryError};
use crate::domain::value_objects::ContentId;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

const MAX_PAGE_SIZE: i64 = 100;

/// Use case: fetch one information item
pub struct GetInformationUseCase {
    information_repo: Arc<dyn InformationRepository>,
}

impl GetInformationUseCase {
    pub fn new(information_repo: Arc<dyn InformationRepository>) -> Self {
        Self { information_repo }
    }

    pub async fn execute(&self, id: ContentId) -> Result<InformationDto, QueryError> {
        let item = self
            .information_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| QueryError::NotFound(id.to_string()))?;

        Ok(InformationDto::from(item))
    }
}

/// Use case: list information items with filters and pagination
pub struct ListInformationUseCase {
    information_repo: Arc<dyn InformationRepository>,
}

impl ListInformationUseCase {
    pub fn new(information_repo: Arc<dyn InformationRepository>) -> Self {
        Self { information_repo }
    }

    pub async fn execute(
        &self,
        mut filter: InformationFilter,
    ) -> Result<ListResponse<InformationDto>, QueryError> {
        if filter.limit <= 0 {
            filter.limit = 20;
        }
        filter.limit = filter.limit.min(MAX_PAGE_SIZE);
        if filter.offset < 0 {
            return Err(QueryError::InvalidRequest("offset must be >= 0".to_string()));
        }

        let items = self.information_repo.list(&filter).await?;
        let dtos: Vec<InformationDto> = items.into_iter().map(InformationDto::from).collect();

        Ok(ListResponse {
            total: dtos.len(),
            limit: filter.limit,
            offset: filter.offset,
            items: dtos,
        })
    }
}
