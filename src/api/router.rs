use axum::{
    http::header,
    middleware as axum_middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer, limit::RequestBodyLimitLayer,
    sensitive_headers::SetSensitiveRequestHeadersLayer,
};

use crate::api::handlers::{
    create_activity_handler, create_activity_media_handler, create_category_handler,
    create_information_handler, create_information_media_handler, delete_activity_handler,
    delete_information_handler, download_file_handler, get_activity_handler,
    get_information_handler, health_handler, list_activities_handler, list_categories_handler,
    list_information_handler, readiness_handler, replace_activity_file_handler,
    replace_information_file_handler, update_activity_handler, update_information_handler,
};
use crate::api::middleware::{auth, operator_guard::OperatorGuard};
use crate::application::use_cases::{
    CreateActivityUseCase, CreateCategoryUseCase, CreateInformationUseCase, DeleteActivityUseCase,
    DeleteInformationUseCase, DownloadFileUseCase, GetActivityUseCase, GetInformationUseCase,
    ListActivitiesUseCase, ListCategoriesUseCase, ListInformationUseCase, UpdateActivityUseCase,
    UpdateInformationUseCase,
};

/// Application state container
pub struct AppState {
    pub pool: Arc<PgPool>,
    pub create_information: Arc<CreateInformationUseCase>,
    pub get_information: Arc<GetInformationUseCase>,
    pub list_information: Arc<ListInformationUseCase>,
    pub update_information: Arc<UpdateInformationUseCase>,
    pub delete_information: Arc<DeleteInformationUseCase>,
    pub create_activity: Arc<CreateActivityUseCase>,
    pub get_activity: Arc<GetActivityUseCase>,
    pub list_activities: Arc<ListActivitiesUseCase>,
    pub update_activity: Arc<UpdateActivityUseCase>,
    pub delete_activity: Arc<DeleteActivityUseCase>,
    pub list_categories: Arc<ListCategoriesUseCase>,
    pub create_category: Arc<CreateCategoryUseCase>,
    pub download_file: Arc<DownloadFileUseCase>,
}

const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Create router with all routes and middleware
pub fn create_router(state: AppState, guard: OperatorGuard) -> Router {
    Router::new()
        // Health checks (no auth required)
        .route("/health", get(health_handler))
        .route(
            "/health/ready",
            get(readiness_handler).with_state(Arc::clone(&state.pool)),
        )
        // Information
        .route(
            "/v1/information",
            post(create_information_handler).with_state(Arc::clone(&state.create_information)),
        )
        .route(
            "/v1/information/media",
            post(create_information_media_handler).with_state(state.create_information),
        )
        .route(
            "/v1/information",
            get(list_information_handler).with_state(state.list_information),
        )
        .route(
            "/v1/information/{id}",
            get(get_information_handler).with_state(state.get_information),
        )
        .route(
            "/v1/information/{id}",
            patch(update_information_handler).with_state(Arc::clone(&state.update_information)),
        )
        .route(
            "/v1/information/{id}/file",
            put(replace_information_file_handler).with_state(state.update_information),
        )
        .route(
            "/v1/information/{id}",
            delete(delete_information_handler).with_state(state.delete_information),
        )
        // Activities
        .route(
            "/v1/activities",
            post(create_activity_handler).with_state(Arc::clone(&state.create_activity)),
        )
        .route(
            "/v1/activities/media",
            post(create_activity_media_handler).with_state(state.create_activity),
        )
        .route(
            "/v1/activities",
            get(list_activities_handler).with_state(state.list_activities),
        )
        .route(
            "/v1/activities/{id}",
            get(get_activity_handler).with_state(state.get_activity),
        )
        .route(
            "/v1/activities/{id}",
            patch(update_activity_handler).with_state(Arc::clone(&state.update_activity)),
        )
        .route(
            "/v1/activities/{id}/file",
            put(replace_activity_file_handler).with_state(state.update_activity),
        )
        .route(
            "/v1/activities/{id}",
            delete(delete_activity_handler).with_state(state.delete_activity),
        )
        // Categories
        .route(
            "/v1/categories",
            get(list_categories_handler).with_state(state.list_categories),
        )
        .route(
            "/v1/categories",
            post(create_category_handler).with_state(state.create_category),
        )
        // Files
        .route(
            "/v1/files/{id}",
            get(download_file_handler).with_state(state.download_file),
        )
        // Middleware: auth resolves the actor first, then the operator
        // guard sanitizes what the handlers will read
        .layer(axum_middleware::from_fn(move |request, next| {
            let guard = guard.clone();
            async move { guard.layer(request, next).await }
        }))
        .layer(axum_middleware::from_fn(auth::auth_middleware))
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
        .layer(SetSensitiveRequestHeadersLayer::new([header::AUTHORIZATION]))
}
