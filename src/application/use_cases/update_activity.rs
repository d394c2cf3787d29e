use chrono::Utc;
use std::sync::Arc;
use tracing::warn;

use crate::application::dto::{ActivityDto, UpdateActivityRequest};
use crate::application::ports::{ActivityRepository, CategoryRepository, FileStore};
use crate::application::update::{
    activity_rules as rules, FieldChange, UpdateError, UpdateFieldSet,
};
use crate::domain::authorization::ActorContext;
use crate::domain::value_objects::ContentId;

/// Use case: partially update an activity. All activity mutation is
/// admin-only; the first activation stamps the validation fields.
pub struct UpdateActivityUseCase {
    activity_repo: Arc<dyn ActivityRepository>,
    category_repo: Arc<dyn CategoryRepository>,
    file_store: Arc<dyn FileStore>,
}

impl UpdateActivityUseCase {
    pub fn new(
        activity_repo: Arc<dyn ActivityRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        file_store: Arc<dyn FileStore>,
    ) -> Self {
        Self {
            activity_repo,
            category_repo,
            file_store,
        }
    }

    pub async fn execute(
        &self,
        id: ContentId,
        payload: UpdateActivityRequest,
        actor: &ActorContext,
    ) -> Result<ActivityDto, UpdateError> {
        if !actor.is_admin() {
            return Err(UpdateError::AccessDenied);
        }

        let entity = self
            .activity_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| UpdateError::NotFound(id.to_string()))?;

        let now = Utc::now();
        let mut fields = UpdateFieldSet::new();

        for change in [
            rules::name_rule(&payload),
            rules::description_rule(&payload),
            rules::content_rule(&payload, &entity),
        ]
        .into_iter()
        .flatten()
        {
            fields.push(change);
        }

        if let Some(category_id) = rules::category_rule(&payload) {
            match self.category_repo.find_by_id(&category_id).await? {
                Some(category) if category.is_active() => {
                    fields.push(FieldChange::Category(category_id));
                }
                _ => return Err(UpdateError::InvalidCategory(category_id)),
            }
        }

        if let Some(change) = rules::active_rule(&payload, &entity, actor, now) {
            fields.push(change);
        }

        if let Some(upload) = rules::file_rule(&payload, &entity)? {
            let stored = self
                .file_store
                .store(upload.bytes.clone(), &upload.filename, &upload.mime_type)
                .await?;
            fields.push(FieldChange::File {
                new_file: stored.id,
                superseded: entity.file_id().copied(),
            });
        }

        if fields.is_empty() {
            return Err(UpdateError::NoFields);
        }

        let superseded = fields.superseded_file();

        let updated = self
            .activity_repo
            .update_fields(&id, &fields)
            .await?
            .ok_or_else(|| UpdateError::NotFound(id.to_string()))?;

        if let Some(old) = superseded {
            if let Err(e) = self.file_store.delete(&old).await {
                warn!("Failed to delete superseded file {}: {}", old, e);
            }
        }

        Ok(ActivityDto::from(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        MockActivityRepository, MockCategoryRepository, MockFileStore,
    };
    use crate::domain::entities::Activity;
    use crate::domain::value_objects::{CategoryId, ContentKind, UserId};

    fn activity(author: UserId) -> Activity {
        Activity::new(
            "Summer camp".to_string(),
            "Annual camp".to_string(),
            ContentKind::Text,
            Some("Details".to_string()),
            CategoryId::new(),
            None,
            author,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_non_admin_is_denied_even_as_author() {
        let author = UserId::new();

        let mut activity_repo = MockActivityRepository::new();
        activity_repo.expect_find_by_id().never();
        activity_repo.expect_update_fields().never();

        let use_case = UpdateActivityUseCase::new(
            Arc::new(activity_repo),
            Arc::new(MockCategoryRepository::new()),
            Arc::new(MockFileStore::new()),
        );

        let payload = UpdateActivityRequest {
            name: Some("Renamed".to_string()),
            ..Default::default()
        };
        let err = use_case
            .execute(ContentId::new(), payload, &ActorContext::contributor(author))
            .await
            .unwrap_err();

        assert!(matches!(err, UpdateError::AccessDenied));
    }

    #[tokio::test]
    async fn test_first_activation_commits_stamp() {
        let admin = UserId::new();
        let entity = activity(UserId::new());
        let updated = entity.clone();

        let mut activity_repo = MockActivityRepository::new();
        activity_repo
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(entity.clone())));
        activity_repo
            .expect_update_fields()
            .times(1)
            .withf(move |_, fields| {
                fields.changes().iter().any(|c| {
                    matches!(
                        c,
                        FieldChange::Active { active: true, stamp: Some(s) }
                            if s.validated_by == admin
                    )
                })
            })
            .returning(move |_, _| Ok(Some(updated.clone())));

        let use_case = UpdateActivityUseCase::new(
            Arc::new(activity_repo),
            Arc::new(MockCategoryRepository::new()),
            Arc::new(MockFileStore::new()),
        );

        let payload = UpdateActivityRequest {
            is_active: Some(true),
            ..Default::default()
        };
        let result = use_case
            .execute(ContentId::new(), payload, &ActorContext::admin(admin))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_empty_payload_yields_no_fields() {
        let entity = activity(UserId::new());

        let mut activity_repo = MockActivityRepository::new();
        activity_repo
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(entity.clone())));
        activity_repo.expect_update_fields().never();

        let use_case = UpdateActivityUseCase::new(
            Arc::new(activity_repo),
            Arc::new(MockCategoryRepository::new()),
            Arc::new(MockFileStore::new()),
        );

        let err = use_case
            .execute(
                ContentId::new(),
                UpdateActivityRequest::default(),
                &ActorContext::admin(UserId::new()),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, UpdateError::NoFields));
    }
}
