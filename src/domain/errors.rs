use thiserror::Error;

use super::value_objects::ContentKind;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Title cannot be empty")]
    EmptyTitle,

    #[error("TEXT content requires an inline body")]
    MissingContentBody,

    #[error("{0} content requires a stored file")]
    MissingFile(ContentKind),
}
