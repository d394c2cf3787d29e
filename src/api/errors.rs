use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::application::update::UpdateError;
use crate::application::use_cases::{
    CategoryError, CreateError, DeleteError, DownloadError, QueryError,
};

/// API error response
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message,
        }));

        (self.status, body).into_response()
    }
}

// Convert use case errors to API errors

impl From<UpdateError> for ApiError {
    fn from(err: UpdateError) -> Self {
        match err {
            UpdateError::AccessDenied => ApiError::forbidden("access denied"),
            UpdateError::NotFound(msg) => ApiError::not_found(msg),
            UpdateError::InvalidCategory(id) => {
                ApiError::unprocessable(format!("category not found or inactive: {}", id))
            }
            UpdateError::InvalidPayload(msg) => ApiError::bad_request(msg),
            UpdateError::NoFields => ApiError::bad_request("no fields to update"),
            UpdateError::Repository(e) => {
                ApiError::internal_error(format!("Repository error: {}", e))
            }
            UpdateError::Storage(e) => ApiError::internal_error(format!("Storage error: {}", e)),
        }
    }
}

impl From<CreateError> for ApiError {
    fn from(err: CreateError) -> Self {
        match err {
            CreateError::Domain(e) => ApiError::bad_request(e.to_string()),
            CreateError::InvalidCategory(id) => {
                ApiError::unprocessable(format!("category not found or inactive: {}", id))
            }
            CreateError::InvalidRequest(msg) => ApiError::bad_request(msg),
            CreateError::Repository(e) => {
                ApiError::internal_error(format!("Repository error: {}", e))
            }
            CreateError::Storage(e) => ApiError::internal_error(format!("Storage error: {}", e)),
        }
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::NotFound(msg) => ApiError::not_found(msg),
            QueryError::InvalidRequest(msg) => ApiError::bad_request(msg),
            QueryError::Repository(e) => {
                ApiError::internal_error(format!("Repository error: {}", e))
            }
        }
    }
}

impl From<DeleteError> for ApiError {
    fn from(err: DeleteError) -> Self {
        match err {
            DeleteError::NotFound(msg) => ApiError::not_found(msg),
            DeleteError::AccessDenied => ApiError::forbidden("access denied"),
            DeleteError::Repository(e) => {
                ApiError::internal_error(format!("Repository error: {}", e))
            }
        }
    }
}

impl From<DownloadError> for ApiError {
    fn from(err: DownloadError) -> Self {
        match err {
            DownloadError::NotFound(msg) => ApiError::not_found(msg),
            DownloadError::Storage(e) => ApiError::internal_error(format!("Storage error: {}", e)),
        }
    }
}

impl From<CategoryError> for ApiError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::AccessDenied => ApiError::forbidden("access denied"),
            CategoryError::Domain(e) => ApiError::bad_request(e.to_string()),
            CategoryError::Repository(e) => {
                ApiError::internal_error(format!("Repository error: {}", e))
            }
        }
    }
}
