use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::ApiError;

/// JSON success response with an explicit status code.
///
/// The body is serialized up front so an encoding failure turns into a logged 500
/// instead of a truncated response.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub status_code: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful API response with default 200 status
    pub fn success(data: T) -> Self {
        Self::with_status(data, StatusCode::OK)
    }

    pub fn with_status(data: T, status_code: StatusCode) -> Self {
        Self { data, status_code }
    }

    pub fn created(data: T) -> Self {
        Self::with_status(data, StatusCode::CREATED)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let body = match serde_json::to_vec(&self.data) {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("encode response: {}", e);
                return ApiError::internal_server_error("internal error").into_response();
            }
        };

        (
            self.status_code,
            [(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
            body,
        )
            .into_response()
    }
}

/// `{"status": "..."}` marker returned by the mutating endpoints.
#[derive(Debug, Serialize)]
pub struct StatusMarker {
    pub status: &'static str,
}

impl StatusMarker {
    pub fn created() -> ApiResponse<Self> {
        ApiResponse::created(Self { status: "created" })
    }

    pub fn updated() -> ApiResponse<Self> {
        ApiResponse::success(Self { status: "updated" })
    }

    pub fn deleted() -> ApiResponse<Self> {
        ApiResponse::success(Self { status: "deleted" })
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;
