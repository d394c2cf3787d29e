mod categories;
mod create_activity;
mod create_information;
mod delete_activity;
mod delete_information;
mod download_file;
mod query_activity;
mod query_information;
mod update_activity;
mod update_information;

pub use categories::{CategoryError, CreateCategoryUseCase, ListCategoriesUseCase};
pub use create_activity::CreateActivityUseCase;
pub use create_information::{CreateError, CreateInformationUseCase};
pub use delete_activity::DeleteActivityUseCase;
pub use delete_information::{DeleteError, DeleteInformationUseCase};
pub use download_file::{DownloadError, DownloadFileUseCase};
pub use query_activity::{GetActivityUseCase, ListActivitiesUseCase};
pub use query_information::{GetInformationUseCase, ListInformationUseCase, QueryError};
pub use update_activity::UpdateActivityUseCase;
pub use update_information::UpdateInformationUseCase;
