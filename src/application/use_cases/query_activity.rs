use std::sync::Arc;

use super::query_information::QueryError;
use crate::application::dto::{ActivityDto, ActivityFilter, ListResponse};
use crate::application::ports::ActivityRepository;
use crate::domain::value_objects::ContentId;

const MAX_PAGE_SIZE: i64 = 100;

/// Use case: fetch one activity
pub struct GetActivityUseCase {
    activity_repo: Arc<dyn ActivityRepository>,
}

impl GetActivityUseCase {
    pub fn new(activity_repo: Arc<dyn ActivityRepository>) -> Self {
        Self { activity_repo }
    }

    pub async fn execute(&self, id: ContentId) -> Result<ActivityDto, QueryError> {
        let activity = self
            .activity_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| QueryError::NotFound(id.to_string()))?;

        Ok(ActivityDto::from(activity))
    }
}

/// Use case: list activities with filters and pagination
pub struct ListActivitiesUseCase {
    activity_repo: Arc<dyn ActivityRepository>,
}

impl ListActivitiesUseCase {
    pub fn new(activity_repo: Arc<dyn ActivityRepository>) -> Self {
        Self { activity_repo }
    }

    pub async fn execute(
        &self,
        mut filter: ActivityFilter,
    ) -> Result<ListResponse<ActivityDto>, QueryError> {
        if filter.limit <= 0 {
            filter.limit = 20;
        }
        filter.limit = filter.limit.min(MAX_PAGE_SIZE);
        if filter.offset < 0 {
            return Err(QueryError::InvalidRequest("offset must be >= 0".to_string()));
        }

        let activities = self.activity_repo.list(&filter).await?;
        let dtos: Vec<ActivityDto> = activities.into_iter().map(ActivityDto::from).collect();

        Ok(ListResponse {
            total: dtos.len(),
            limit: filter.limit,
            offset: filter.offset,
            items: dtos,
        })
    }
}
