use std::sync::Arc;

use super::create_information::CreateError;
use crate::application::dto::{ActivityDto, CreateActivityRequest};
use crate::application::ports::{ActivityRepository, CategoryRepository, FileStore};
use crate::domain::authorization::ActorContext;
use crate::domain::entities::Activity;

/// Use case: create an activity (admin-only, initially inactive)
pub struct CreateActivityUseCase {
    activity_repo: Arc<dyn ActivityRepository>,
    category_repo: Arc<dyn CategoryRepository>,
    file_store: Arc<dyn FileStore>,
}

impl CreateActivityUseCase {
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
        request: CreateActivityRequest,
        actor: &ActorContext,
    ) -> Result<ActivityDto, CreateError> {
        if !actor.is_admin() {
            return Err(CreateError::InvalidRequest(
                "only administrators can create activities".to_string(),
            ));
        }

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

        let activity = Activity::new(
            request.name,
            request.description,
            request.kind,
            request.content,
            request.category_id,
            file_id,
            *actor.user_id(),
        )?;

        self.activity_repo.insert(&activity).await?;

        Ok(ActivityDto::from(activity))
    }
}
