mod activity_repository;
mod audit_sink;
mod category_repository;
mod file_store;
mod information_repository;

pub use activity_repository::ActivityRepository;
pub use audit_sink::{AuditSink, SecurityEventContext};
pub use category_repository::CategoryRepository;
pub use file_store::{FileReader, FileStore, StorageError};
pub use information_repository::{InformationRepository, RepositoryError};

#[cfg(test)]
pub use activity_repository::MockActivityRepository;
#[cfg(test)]
pub use audit_sink::MockAuditSink;
#[cfg(test)]
pub use category_repository::MockCategoryRepository;
#[cfg(test)]
pub use file_store::MockFileStore;
#[cfg(test)]
pub use information_repository::MockInformationRepository;
