use axum::{
    body::Bytes,
    extract::{Extension, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use super::information::content_type;
use crate::api::errors::ApiError;
use crate::application::dto::{
    ActivityDto, ActivityFilter, CreateActivityRequest, FileUpload, ListResponse,
    UpdateActivityRequest,
};
use crate::application::use_cases::{
    CreateActivityUseCase, DeleteActivityUseCase, GetActivityUseCase, ListActivitiesUseCase,
    UpdateActivityUseCase,
};
use crate::domain::authorization::ActorContext;
use crate::domain::value_objects::{CategoryId, ContentId, ContentKind};

#[derive(Deserialize)]
pub struct ActivityListQuery {
    category: Option<CategoryId>,
    active: Option<bool>,
    limit: Option<i64>,
    offset: Option<i64>,
}

/// POST /v1/activities
pub async fn create_activity_handler(
    State(use_case): State<Arc<CreateActivityUseCase>>,
    Extension(actor): Extension<ActorContext>,
    Json(request): Json<CreateActivityRequest>,
) -> Result<(StatusCode, Json<ActivityDto>), ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let activity = use_case.execute(request, &actor).await?;

    Ok((StatusCode::CREATED, Json(activity)))
}

#[derive(Deserialize)]
pub struct CreateActivityMediaQuery {
    name: String,
    #[serde(default)]
    description: String,
    kind: String,
    category_id: CategoryId,
    filename: String,
}

/// POST /v1/activities/media
pub async fn create_activity_media_handler(
    State(use_case): State<Arc<CreateActivityUseCase>>,
    Extension(actor): Extension<ActorContext>,
    Query(query): Query<CreateActivityMediaQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<ActivityDto>), ApiError> {
    let kind = query.kind.parse::<ContentKind>().map_err(ApiError::bad_request)?;
    let mime_type = content_type(&headers)?;

    let request = CreateActivityRequest {
        name: query.name,
        description: query.description,
        kind,
        content: None,
        category_id: query.category_id,
        file: Some(FileUpload {
            filename: query.filename,
            mime_type,
            bytes: body,
        }),
    };
    request
        .validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let activity = use_case.execute(request, &actor).await?;

    Ok((StatusCode::CREATED, Json(activity)))
}

/// GET /v1/activities
pub async fn list_activities_handler(
    State(use_case): State<Arc<ListActivitiesUseCase>>,
    Query(query): Query<ActivityListQuery>,
) -> Result<Json<ListResponse<ActivityDto>>, ApiError> {
    let filter = ActivityFilter {
        category_id: query.category,
        active: query.active,
        limit: query.limit.unwrap_or(20),
        offset: query.offset.unwrap_or(0),
    };

    Ok(Json(use_case.execute(filter).await?))
}

/// GET /v1/activities/{id}
pub async fn get_activity_handler(
    State(use_case): State<Arc<GetActivityUseCase>>,
    Path(id): Path<ContentId>,
) -> Result<Json<ActivityDto>, ApiError> {
    Ok(Json(use_case.execute(id).await?))
}

/// PATCH /v1/activities/{id}
pub async fn update_activity_handler(
    State(use_case): State<Arc<UpdateActivityUseCase>>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<ContentId>,
    Json(request): Json<UpdateActivityRequest>,
) -> Result<Json<ActivityDto>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let activity = use_case.execute(id, request, &actor).await?;

    Ok(Json(activity))
}

#[derive(Deserialize)]
pub struct FileReplaceQuery {
    filename: String,
}

/// PUT /v1/activities/{id}/file
pub async fn replace_activity_file_handler(
    State(use_case): State<Arc<UpdateActivityUseCase>>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<ContentId>,
    Query(query): Query<FileReplaceQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ActivityDto>, ApiError> {
    let mime_type = content_type(&headers)?;

    let request = UpdateActivityRequest {
        file: Some(FileUpload {
            filename: query.filename,
            mime_type,
            bytes: body,
        }),
        ..Default::default()
    };

    let activity = use_case.execute(id, request, &actor).await?;

    Ok(Json(activity))
}

/// DELETE /v1/activities/{id}
pub async fn delete_activity_handler(
    State(use_case): State<Arc<DeleteActivityUseCase>>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<ContentId>,
) -> Result<StatusCode, ApiError> {
    use_case.execute(id, &actor).await?;

    Ok(StatusCode::NO_CONTENT)
}
