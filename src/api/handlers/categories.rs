use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::api::errors::ApiError;
use crate::application::dto::{CategoryDto, CreateCategoryRequest};
use crate::application::use_cases::{CreateCategoryUseCase, ListCategoriesUseCase};
use crate::domain::authorization::ActorContext;

/// GET /v1/categories
pub async fn list_categories_handler(
    State(use_case): State<Arc<ListCategoriesUseCase>>,
) -> Result<Json<Vec<CategoryDto>>, ApiError> {
    Ok(Json(use_case.execute().await?))
}

/// POST /v1/categories
pub async fn create_category_handler(
    State(use_case): State<Arc<CreateCategoryUseCase>>,
    Extension(actor): Extension<ActorContext>,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryDto>), ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let category = use_case.execute(request, &actor).await?;

    Ok((StatusCode::CREATED, Json(category)))
}
