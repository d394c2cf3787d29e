use axum::{
    body::Body,
    extract::{Path, State},
    http::header,
    response::Response,
};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

use crate::api::errors::ApiError;
use crate::application::use_cases::DownloadFileUseCase;
use crate::domain::value_objects::FileId;

/// GET /v1/files/{id}
/// Stream a stored blob with its original MIME type and filename
pub async fn download_file_handler(
    State(use_case): State<Arc<DownloadFileUseCase>>,
    Path(id): Path<FileId>,
) -> Result<Response, ApiError> {
    let (receipt, reader) = use_case.execute(id).await?;

    let stream = ReaderStream::new(reader);

    Response::builder()
        .header(header::CONTENT_TYPE, receipt.mime_type)
        .header(header::CONTENT_LENGTH, receipt.size_bytes)
        .header(
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", receipt.filename),
        )
        .body(Body::from_stream(stream))
        .map_err(|e| ApiError::internal_error(format!("response build failed: {}", e)))
}
