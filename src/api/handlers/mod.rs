mod activities;
mod categories;
mod files;
mod health;
mod information;

pub use activities::{
    create_activity_handler, create_activity_media_handler, delete_activity_handler,
    get_activity_handler, list_activities_handler, replace_activity_file_handler,
    update_activity_handler,
};
pub use categories::{create_category_handler, list_categories_handler};
pub use files::download_file_handler;
pub use health::{health_handler, readiness_handler};
pub use information::{
    create_information_handler, create_information_media_handler, delete_information_handler,
    get_information_handler, list_information_handler, replace_information_file_handler,
    update_information_handler,
};
