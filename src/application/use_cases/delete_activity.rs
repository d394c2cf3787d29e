use std::sync::Arc;
use tracing::warn;

use super::delete_information::DeleteError;
use crate::application::ports::{ActivityRepository, FileStore};
use crate::domain::authorization::ActorContext;
use crate::domain::value_objects::ContentId;

/// Use case: delete an activity (admin-only)
pub struct DeleteActivityUseCase {
    activity_repo: Arc<dyn ActivityRepository>,
    file_store: Arc<dyn FileStore>,
}

impl DeleteActivityUseCase {
    pub fn new(activity_repo: Arc<dyn ActivityRepository>, file_store: Arc<dyn FileStore>) -> Self {
        Self {
            activity_repo,
            file_store,
        }
    }

    pub async fn execute(&self, id: ContentId, actor: &ActorContext) -> Result<(), DeleteError> {
        if !actor.is_admin() {
            return Err(DeleteError::AccessDenied);
        }

        let activity = self
            .activity_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| DeleteError::NotFound(id.to_string()))?;

        let file_id = activity.file_id().copied();
        self.activity_repo.delete(&id).await?;

        if let Some(file_id) = file_id {
            if let Err(e) = self.file_store.delete(&file_id).await {
                warn!(
                    "Failed to delete file {} for removed activity {}: {}",
                    file_id, id, e
                );
            }
        }

        Ok(())
    }
}
