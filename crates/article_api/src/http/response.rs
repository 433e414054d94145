//! Response envelope and HTTP error mapping.

use article_core::ServiceError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde::Serialize;

/// Uniform JSON envelope for every article endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Error returned by handlers; rendered as a failure envelope.
#[derive(Debug)]
pub enum ApiError {
    /// 400
    Validation(String),
    /// 404
    NotFound(String),
    /// 500
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::Validation(message) => Self::Validation(message),
            err @ ServiceError::BulkFailed(_) => Self::Validation(err.to_string()),
            ServiceError::NotFound(_) => Self::NotFound("article not found".to_string()),
            ServiceError::Persistence(err) => {
                error!("event=storage_failure module=http status=error error={err}");
                Self::Internal(format!("storage error: {err}"))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::Validation(message) | Self::NotFound(message) | Self::Internal(message) => message,
        };
        (status, Json(ApiResponse::failure(message))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
