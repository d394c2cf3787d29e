use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    errors::DomainError,
    value_objects::{CategoryId, ContentId, ContentKind, FileId, UserId},
};

/// Activity aggregate root - an event-style content item toggled between
/// inactive and active by administrators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    id: ContentId,
    name: String,
    description: String,
    kind: ContentKind,
    content: Option<String>,
    is_active: bool,
    category_id: CategoryId,
    file_id: Option<FileId>,
    author_id: UserId,
    validated_by: Option<UserId>,
    validated_and_published_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Activity {
    /// Create a new activity, initially inactive
    pub fn new(
        name: String,
        description: String,
        kind: ContentKind,
        content: Option<String>,
        category_id: CategoryId,
        file_id: Option<FileId>,
        author_id: UserId,
    ) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
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
            name,
            description,
            kind,
            content,
            is_active: false,
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
        name: String,
        description: String,
        kind: ContentKind,
        content: Option<String>,
        is_active: bool,
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
            name,
            description,
            kind,
            content,
            is_active,
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

    pub fn name(&self) -> &str {
        &self.name
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

    pub fn is_active(&self) -> bool {
        self.is_active
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

    /// Whether a first-activation stamp already exists
    pub fn has_publish_stamp(&self) -> bool {
        self.validated_and_published_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_activity_starts_inactive() {
        let activity = Activity::new(
            "Summer camp".to_string(),
            "Annual summer camp".to_string(),
            ContentKind::Text,
            Some("Sign up now".to_string()),
            CategoryId::new(),
            None,
            UserId::new(),
        )
        .unwrap();

        assert!(!activity.is_active());
        assert!(!activity.has_publish_stamp());
    }

    #[test]
    fn test_new_media_activity_requires_file() {
        let err = Activity::new(
            "Camp video".to_string(),
            "desc".to_string(),
            ContentKind::Video,
            None,
            CategoryId::new(),
            None,
            UserId::new(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::MissingFile(ContentKind::Video)));
    }
}
