use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    errors::DomainError,
    value_objects::{CategoryId, ContentId, ContentKind, ContentStatus, FileId, UserId},
};

/// Information aggregate root - an editorial content item moving through the
/// draft / pending / published workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Information {
    id: ContentId,
    title: String,
    description: String,
    kind: ContentKind,
    content: Option<String>,
    status: ContentStatus,
    category_id: CategoryId,
    file_id: Option<FileId>,
    author_id: UserId,
    validated_by: Option<UserId>,
    validated_and_published_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Information {
    /// Create a new item in DRAFT state
    pub fn new(
        title: String,
        description: String,
        kind: ContentKind,
        content: Option<String>,
        category_id: CategoryId,
        file_id: Option<FileId>,
        author_id: UserId,
    ) -> Result<Self, DomainError> {
        if title.trim().is_empty() {
            return Err(DomainError::EmptyTitle);
        }
        if kind.is_text() && content.is_none() {
            return Err(DomainError::MissingContentBody);
        }
        if kind.is_media() && file_id.is_none() {
            return Err(DomainError::MissingFile(kind));
        }

        let now = Utc::now();
        Ok(Self {
            id: ContentId::new(),
            title,
            description,
            kind,
            content,
            status: ContentStatus::Draft,
            category_id,
            file_id,
            author_id,
            validated_by: None,
            validated_and_published_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstruct from storage (e.g., database)
    #[allow(clippy::too_many_arguments)]
    pub fn reconstruct(
        id: ContentId,
        title: String,
        description: String,
        kind: ContentKind,
        content: Option<String>,
        status: ContentStatus,
        category_id: CategoryId,
        file_id: Option<FileId>,
        author_id: UserId,
        validated_by: Option<UserId>,
        validated_and_published_at: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            kind,
            content,
            status,
            category_id,
            file_id,
            author_id,
            validated_by,
            validated_and_published_at,
            created_at,
            updated_at,
        }
    }

    // Getters
    pub fn id(&self) -> &ContentId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn status(&self) -> ContentStatus {
        self.status
    }

    pub fn category_id(&self) -> &CategoryId {
        &self.category_id
    }

    pub fn file_id(&self) -> Option<&FileId> {
        self.file_id.as_ref()
    }

    pub fn author_id(&self) -> &UserId {
        &self.author_id
    }

    pub fn validated_by(&self) -> Option<&UserId> {
        self.validated_by.as_ref()
    }

    pub fn validated_and_published_at(&self) -> Option<DateTime<Utc>> {
        self.validated_and_published_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Whether the item was authored by the given user
    pub fn is_authored_by(&self, user_id: &UserId) -> bool {
        &self.author_id == user_id
    }

    /// Whether a publish validation stamp already exists
    pub fn has_publish_stamp(&self) -> bool {
        self.validated_and_published_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_item() -> Information {
        Information::new(
            "Opening hours".to_string(),
            "Updated opening hours".to_string(),
            ContentKind::Text,
            Some("We are open 9-17".to_string()),
            CategoryId::new(),
            None,
            UserId::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_new_information_starts_as_draft() {
        let item = text_item();
        assert_eq!(item.status(), ContentStatus::Draft);
        assert!(item.validated_by().is_none());
        assert!(!item.has_publish_stamp());
    }

    #[test]
    fn test_new_information_rejects_empty_title() {
        let err = Information::new(
            "  ".to_string(),
            "desc".to_string(),
            ContentKind::Text,
            Some("body".to_string()),
            CategoryId::new(),
            None,
            UserId::new(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::EmptyTitle));
    }

    #[test]
    fn test_new_text_information_requires_content() {
        let err = Information::new(
            "Title".to_string(),
            "desc".to_string(),
            ContentKind::Text,
            None,
            CategoryId::new(),
            None,
            UserId::new(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::MissingContentBody));
    }

    #[test]
    fn test_new_media_information_requires_file() {
        let err = Information::new(
            "Title".to_string(),
            "desc".to_string(),
            ContentKind::Image,
            None,
            CategoryId::new(),
            None,
            UserId::new(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::MissingFile(ContentKind::Image)));
    }

    #[test]
    fn test_is_authored_by() {
        let item = text_item();
        assert!(item.is_authored_by(item.author_id()));
        assert!(!item.is_authored_by(&UserId::new()));
    }
}
