mod postgres_activity_repository;
mod postgres_category_repository;
mod postgres_information_repository;
mod update_sql;

pub use postgres_activity_repository::PostgresActivityRepository;
pub use postgres_category_repository::PostgresCategoryRepository;
pub use postgres_information_repository::PostgresInformationRepository;
