//! Partial-update merge policy: ordered field eligibility rules building an
//! UpdateFieldSet, evaluated once per update call.

pub mod activity_rules;
mod field_set;
pub mod information_rules;

pub use field_set::{FieldChange, PublishStamp, UpdateFieldSet};

use thiserror::Error;

use crate::application::ports::{RepositoryError, StorageError};
use crate::domain::value_objects::CategoryId;

#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("Access denied")]
    AccessDenied,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Category not found or inactive: {0}")]
    InvalidCategory(CategoryId),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("No fields to update")]
    NoFields,

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Normalize an optional text field: empty or whitespace-only strings count
/// as "no change requested".
pub(crate) fn supplied_text(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}
