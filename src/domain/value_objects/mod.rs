mod category_id;
mod content_id;
mod content_kind;
mod content_status;
mod file_id;
mod stored_file;
mod user_id;

pub use category_id::CategoryId;
pub use content_id::ContentId;
pub use content_kind::ContentKind;
pub use content_status::ContentStatus;
pub use file_id::FileId;
pub use stored_file::StoredFile;
pub use user_id::UserId;
