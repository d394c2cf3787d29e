use chrono::Utc;
use std::sync::Arc;
use tracing::warn;

use crate::application::dto::{InformationDto, UpdateInformationRequest};
use crate::application::ports::{CategoryRepository, FileStore, InformationRepository};
use crate::application::update::{
    information_rules as rules, FieldChange, UpdateError, UpdateFieldSet,
};
use crate::domain::authorization::ActorContext;
use crate::domain::value_objects::ContentId;

/// Use case: partially update an information item.
///
/// Applies the eligibility rules in order, verifies the category reference
/// before touching blob storage, and persists the computed field set with a
/// single atomic update. There is no partial commit: any failure before the
/// repository call discards everything staged so far.
pub struct UpdateInformationUseCase {
    information_repo: Arc<dyn InformationRepository>,
    category_repo: Arc<dyn CategoryRepository>,
    file_store: Arc<dyn FileStore>,
}

impl UpdateInformationUseCase {
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
        id: ContentId,
        payload: UpdateInformationRequest,
        actor: &ActorContext,
    ) -> Result<InformationDto, UpdateError> {
        let entity = self
            .information_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| UpdateError::NotFound(id.to_string()))?;

        if !actor.can_manage(entity.author_id()) {
            return Err(UpdateError::AccessDenied);
        }

        let now = Utc::now();
        let mut fields = UpdateFieldSet::new();

        for change in [
            rules::title_rule(&payload),
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

        if let Some(change) = rules::status_rule(&payload, actor, now)? {
            fields.push(change);
        }

        // Category verification happens above so a bad reference never
        // strands a freshly stored blob.
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
            .information_repo
            .update_fields(&id, &fields)
            .await?
            .ok_or_else(|| UpdateError::NotFound(id.to_string()))?;

        // The old blob goes away strictly after the new one is durable and
        // the row committed; failure leaves an orphan, not a broken item.
        if let Some(old) = superseded {
            if let Err(e) = self.file_store.delete(&old).await {
                warn!("Failed to delete superseded file {}: {}", old, e);
            }
        }

        Ok(InformationDto::from(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::FileUpload;
    use crate::application::ports::{
        MockCategoryRepository, MockFileStore, MockInformationRepository, StorageError,
    };
    use crate::domain::entities::{Category, Information};
    use crate::domain::value_objects::{
        CategoryId, ContentKind, ContentStatus, FileId, StoredFile, UserId,
    };
    use bytes::Bytes;

    fn text_entity(author: UserId) -> Information {
        Information::new(
            "Title".to_string(),
            "Description".to_string(),
            ContentKind::Text,
            Some("Body".to_string()),
            CategoryId::new(),
            None,
            author,
        )
        .unwrap()
    }

    fn image_entity(author: UserId, file_id: FileId) -> Information {
        Information::new(
            "Photo".to_string(),
            "A photo".to_string(),
            ContentKind::Image,
            None,
            CategoryId::new(),
            Some(file_id),
            author,
        )
        .unwrap()
    }

    fn use_case(
        information_repo: MockInformationRepository,
        category_repo: MockCategoryRepository,
        file_store: MockFileStore,
    ) -> UpdateInformationUseCase {
        UpdateInformationUseCase::new(
            Arc::new(information_repo),
            Arc::new(category_repo),
            Arc::new(file_store),
        )
    }

    #[tokio::test]
    async fn test_empty_payload_yields_no_fields_without_persistence() {
        let author = UserId::new();
        let entity = text_entity(author);

        let mut information_repo = MockInformationRepository::new();
        information_repo
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(entity.clone())));
        information_repo.expect_update_fields().never();

        let use_case = use_case(
            information_repo,
            MockCategoryRepository::new(),
            MockFileStore::new(),
        );

        let err = use_case
            .execute(
                ContentId::new(),
                UpdateInformationRequest::default(),
                &ActorContext::contributor(author),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, UpdateError::NoFields));
    }

    #[tokio::test]
    async fn test_content_against_media_entity_yields_no_fields() {
        let author = UserId::new();
        let entity = image_entity(author, FileId::new());

        let mut information_repo = MockInformationRepository::new();
        information_repo
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(entity.clone())));
        information_repo.expect_update_fields().never();

        let use_case = use_case(
            information_repo,
            MockCategoryRepository::new(),
            MockFileStore::new(),
        );

        let payload = UpdateInformationRequest {
            content: Some("New body".to_string()),
            ..Default::default()
        };
        let err = use_case
            .execute(ContentId::new(), payload, &ActorContext::contributor(author))
            .await
            .unwrap_err();

        assert!(matches!(err, UpdateError::NoFields));
    }

    #[tokio::test]
    async fn test_non_author_is_denied_before_any_field() {
        let entity = text_entity(UserId::new());

        let mut information_repo = MockInformationRepository::new();
        information_repo
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(entity.clone())));
        information_repo.expect_update_fields().never();

        let use_case = use_case(
            information_repo,
            MockCategoryRepository::new(),
            MockFileStore::new(),
        );

        let payload = UpdateInformationRequest {
            title: Some("Hijacked".to_string()),
            ..Default::default()
        };
        let err = use_case
            .execute(
                ContentId::new(),
                payload,
                &ActorContext::contributor(UserId::new()),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, UpdateError::AccessDenied));
    }

    #[tokio::test]
    async fn test_non_admin_publish_is_all_or_nothing() {
        let author = UserId::new();
        let entity = text_entity(author);

        let mut information_repo = MockInformationRepository::new();
        information_repo
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(entity.clone())));
        // The valid title change in the same payload must not be committed
        information_repo.expect_update_fields().never();

        let use_case = use_case(
            information_repo,
            MockCategoryRepository::new(),
            MockFileStore::new(),
        );

        let payload = UpdateInformationRequest {
            title: Some("Valid new title".to_string()),
            status: Some(ContentStatus::Published),
            ..Default::default()
        };
        let err = use_case
            .execute(ContentId::new(), payload, &ActorContext::contributor(author))
            .await
            .unwrap_err();

        assert!(matches!(err, UpdateError::AccessDenied));
    }

    #[tokio::test]
    async fn test_inactive_category_aborts_update() {
        let author = UserId::new();
        let entity = text_entity(author);
        let category_id = CategoryId::new();

        let mut information_repo = MockInformationRepository::new();
        information_repo
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(entity.clone())));
        information_repo.expect_update_fields().never();

        let mut category_repo = MockCategoryRepository::new();
        category_repo.expect_find_by_id().times(1).returning(|id| {
            let inactive =
                Category::reconstruct(*id, "Archive".to_string(), false, Utc::now());
            Ok(Some(inactive))
        });

        let use_case = use_case(information_repo, category_repo, MockFileStore::new());

        let payload = UpdateInformationRequest {
            title: Some("New title".to_string()),
            category_id: Some(category_id),
            ..Default::default()
        };
        let err = use_case
            .execute(ContentId::new(), payload, &ActorContext::contributor(author))
            .await
            .unwrap_err();

        assert!(matches!(err, UpdateError::InvalidCategory(_)));
    }

    #[tokio::test]
    async fn test_file_replace_deletes_old_file_once_and_survives_delete_failure() {
        let author = UserId::new();
        let old_file = FileId::new();
        let new_file = FileId::new();
        let entity = image_entity(author, old_file);
        let updated = entity.clone();

        let mut information_repo = MockInformationRepository::new();
        information_repo
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(entity.clone())));
        information_repo
            .expect_update_fields()
            .times(1)
            .withf(move |_, fields| {
                fields.changes().iter().any(|c| {
                    matches!(
                        c,
                        FieldChange::File { new_file: n, superseded: Some(s) }
                            if *n == new_file && *s == old_file
                    )
                })
            })
            .returning(move |_, _| Ok(Some(updated.clone())));

        let mut file_store = MockFileStore::new();
        file_store.expect_store().times(1).returning(move |_, _, _| {
            Ok(StoredFile {
                id: new_file,
                filename: "new.png".to_string(),
                mime_type: "image/png".to_string(),
                size_bytes: 4,
                sha256: "ab".repeat(32),
            })
        });
        // Exactly one delete attempt on the superseded file; its failure
        // must not fail the update
        file_store
            .expect_delete()
            .times(1)
            .withf(move |id| *id == old_file)
            .returning(|_| Err(StorageError::Internal("disk on fire".to_string())));

        let use_case = use_case(information_repo, MockCategoryRepository::new(), file_store);

        let payload = UpdateInformationRequest {
            file: Some(FileUpload {
                filename: "new.png".to_string(),
                mime_type: "image/png".to_string(),
                bytes: Bytes::from_static(b"data"),
            }),
            ..Default::default()
        };
        let result = use_case
            .execute(ContentId::new(), payload, &ActorContext::contributor(author))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_admin_publish_commits_status_with_stamp() {
        let author = UserId::new();
        let admin = UserId::new();
        let entity = text_entity(author);
        let updated = entity.clone();

        let mut information_repo = MockInformationRepository::new();
        information_repo
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(entity.clone())));
        information_repo
            .expect_update_fields()
            .times(1)
            .withf(move |_, fields| {
                fields.changes().iter().any(|c| {
                    matches!(
                        c,
                        FieldChange::Status { status: ContentStatus::Published, stamp: Some(s) }
                            if s.validated_by == admin
                    )
                })
            })
            .returning(move |_, _| Ok(Some(updated.clone())));

        let use_case = use_case(
            information_repo,
            MockCategoryRepository::new(),
            MockFileStore::new(),
        );

        let payload = UpdateInformationRequest {
            status: Some(ContentStatus::Published),
            ..Default::default()
        };
        let result = use_case
            .execute(ContentId::new(), payload, &ActorContext::admin(admin))
            .await;

        assert!(result.is_ok());
    }
}
