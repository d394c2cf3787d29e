use axum::{
    body::Bytes,
    extract::{Extension, Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::Json,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::api::errors::ApiError;
use crate::application::dto::{
    CreateInformationRequest, FileUpload, InformationDto, InformationFilter, ListResponse,
    UpdateInformationRequest,
};
use crate::application::use_cases::{
    CreateInformationUseCase, DeleteInformationUseCase, GetInformationUseCase,
    ListInformationUseCase, UpdateInformationUseCase,
};
use crate::domain::authorization::ActorContext;
use crate::domain::value_objects::{CategoryId, ContentId, ContentKind, ContentStatus};

#[derive(Deserialize)]
pub struct InformationListQuery {
    category: Option<CategoryId>,
    status: Option<String>,
    limit: Option<i64>,
    offset: Option<i64>,
}

/// POST /v1/information
/// Create a TEXT information item from a JSON payload
pub async fn create_information_handler(
    State(use_case): State<Arc<CreateInformationUseCase>>,
    Extension(actor): Extension<ActorContext>,
    Json(request): Json<CreateInformationRequest>,
) -> Result<(StatusCode, Json<InformationDto>), ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let item = use_case.execute(request, &actor).await?;

    Ok((StatusCode::CREATED, Json(item)))
}

#[derive(Deserialize)]
pub struct CreateMediaQuery {
    title: String,
    #[serde(default)]
    description: String,
    kind: String,
    category_id: CategoryId,
    filename: String,
}

/// POST /v1/information/media
/// Create a media information item; metadata via query, file as raw body
pub async fn create_information_media_handler(
    State(use_case): State<Arc<CreateInformationUseCase>>,
    Extension(actor): Extension<ActorContext>,
    Query(query): Query<CreateMediaQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<InformationDto>), ApiError> {
    let kind = query.kind.parse::<ContentKind>().map_err(ApiError::bad_request)?;
    let mime_type = content_type(&headers)?;

    let request = CreateInformationRequest {
        title: query.title,
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

    let item = use_case.execute(request, &actor).await?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /v1/information
pub async fn list_information_handler(
    State(use_case): State<Arc<ListInformationUseCase>>,
    Query(query): Query<InformationListQuery>,
) -> Result<Json<ListResponse<InformationDto>>, ApiError> {
    let status = match query.status {
        Some(s) => Some(s.parse::<ContentStatus>().map_err(ApiError::bad_request)?),
        None => None,
    };

    let filter = InformationFilter {
        category_id: query.category,
        status,
        limit: query.limit.unwrap_or(20),
        offset: query.offset.unwrap_or(0),
    };

    Ok(Json(use_case.execute(filter).await?))
}

/// GET /v1/information/{id}
pub async fn get_information_handler(
    State(use_case): State<Arc<GetInformationUseCase>>,
    Path(id): Path<ContentId>,
) -> Result<Json<InformationDto>, ApiError> {
    Ok(Json(use_case.execute(id).await?))
}

/// PATCH /v1/information/{id}
/// Partial update from a JSON payload (no file)
pub async fn update_information_handler(
    State(use_case): State<Arc<UpdateInformationUseCase>>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<ContentId>,
    Json(request): Json<UpdateInformationRequest>,
) -> Result<Json<InformationDto>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let item = use_case.execute(id, request, &actor).await?;

    Ok(Json(item))
}

#[derive(Deserialize)]
pub struct FileReplaceQuery {
    filename: String,
}

/// PUT /v1/information/{id}/file
/// Replace the stored file; goes through the same merge policy as PATCH
pub async fn replace_information_file_handler(
    State(use_case): State<Arc<UpdateInformationUseCase>>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<ContentId>,
    Query(query): Query<FileReplaceQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<InformationDto>, ApiError> {
    let mime_type = content_type(&headers)?;

    let request = UpdateInformationRequest {
        file: Some(FileUpload {
            filename: query.filename,
            mime_type,
            bytes: body,
        }),
        ..Default::default()
    };

    let item = use_case.execute(id, request, &actor).await?;

    Ok(Json(item))
}

/// DELETE /v1/information/{id}
pub async fn delete_information_handler(
    State(use_case): State<Arc<DeleteInformationUseCase>>,
    Extension(actor): Extension<ActorContext>,
    Path(id): Path<ContentId>,
) -> Result<StatusCode, ApiError> {
    use_case.execute(id, &actor).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub(super) fn content_type(headers: &HeaderMap) -> Result<String, ApiError> {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| ApiError::bad_request("Content-Type header required"))
}
