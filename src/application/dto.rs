use bytes::Bytes;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::{
    entities::{Activity, Category, Information},
    value_objects::{CategoryId, ContentKind, ContentStatus},
};

/// DTO for information responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InformationDto {
    pub id: String,
    pub title: String,
    pub description: String,
    pub kind: ContentKind,
    pub content: Option<String>,
    pub status: ContentStatus,
    pub category_id: String,
    pub file_id: Option<String>,
    pub author_id: String,
    pub validated_by: Option<String>,
    pub validated_and_published_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Information> for InformationDto {
    fn from(item: Information) -> Self {
        Self {
            id: item.id().to_string(),
            title: item.title().to_string(),
            description: item.description().to_string(),
            kind: item.kind(),
            content: item.content().map(|c| c.to_string()),
            status: item.status(),
            category_id: item.category_id().to_string(),
            file_id: item.file_id().map(|f| f.to_string()),
            author_id: item.author_id().to_string(),
            validated_by: item.validated_by().map(|v| v.to_string()),
            validated_and_published_at: item
                .validated_and_published_at()
                .map(|t| t.to_rfc3339()),
            created_at: item.created_at().to_rfc3339(),
            updated_at: item.updated_at().to_rfc3339(),
        }
    }
}

/// DTO for activity responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub kind: ContentKind,
    pub content: Option<String>,
    pub is_active: bool,
    pub category_id: String,
    pub file_id: Option<String>,
    pub author_id: String,
    pub validated_by: Option<String>,
    pub validated_and_published_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Activity> for ActivityDto {
    fn from(item: Activity) -> Self {
        Self {
            id: item.id().to_string(),
            name: item.name().to_string(),
            description: item.description().to_string(),
            kind: item.kind(),
            content: item.content().map(|c| c.to_string()),
            is_active: item.is_active(),
            category_id: item.category_id().to_string(),
            file_id: item.file_id().map(|f| f.to_string()),
            author_id: item.author_id().to_string(),
            validated_by: item.validated_by().map(|v| v.to_string()),
            validated_and_published_at: item
                .validated_and_published_at()
                .map(|t| t.to_rfc3339()),
            created_at: item.created_at().to_rfc3339(),
            updated_at: item.updated_at().to_rfc3339(),
        }
    }
}

/// DTO for category responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDto {
    pub id: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: String,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.id().to_string(),
            name: category.name().to_string(),
            is_active: category.is_active(),
            created_at: category.created_at().to_rfc3339(),
        }
    }
}

/// A buffered file upload handed to the merge policy / create use cases
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Bytes,
}

/// DTO for creating an information item.
///
/// The file slot is never fed from JSON; the media create route fills it
/// from the raw request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInformationRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 2000))]
    #[serde(default)]
    pub description: String,
    pub kind: ContentKind,
    pub content: Option<String>,
    pub category_id: CategoryId,
    #[serde(skip)]
    pub file: Option<FileUpload>,
}

/// DTO for partially updating an information item.
///
/// Absent fields mean "no change requested". The file slot is never fed
/// from JSON; the file-replacement route fills it from the raw body.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateInformationRequest {
    #[validate(length(max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub content: Option<String>,
    pub category_id: Option<CategoryId>,
    pub status: Option<ContentStatus>,
    #[serde(skip)]
    pub file: Option<FileUpload>,
}

/// DTO for creating an activity
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateActivityRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 2000))]
    #[serde(default)]
    pub description: String,
    pub kind: ContentKind,
    pub content: Option<String>,
    pub category_id: CategoryId,
    #[serde(skip)]
    pub file: Option<FileUpload>,
}

/// DTO for partially updating an activity
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateActivityRequest {
    #[validate(length(max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub content: Option<String>,
    pub category_id: Option<CategoryId>,
    pub is_active: Option<bool>,
    #[serde(skip)]
    pub file: Option<FileUpload>,
}

/// DTO for creating a category
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// Listing filter for information items
#[derive(Debug, Clone, Default)]
pub struct InformationFilter {
    pub category_id: Option<CategoryId>,
    pub status: Option<ContentStatus>,
    pub limit: i64,
    pub offset: i64,
}

/// Listing filter for activities
#[derive(Debug, Clone, Default)]
pub struct ActivityFilter {
    pub category_id: Option<CategoryId>,
    pub active: Option<bool>,
    pub limit: i64,
    pub offset: i64,
}

/// Paged listing response
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub limit: i64,
    pub offset: i64,
}
