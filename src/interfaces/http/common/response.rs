//! Common API response envelope and error mapping

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::shared::{AppError, DomainError};

/// Standard API response wrapper
///
/// Every REST endpoint answers with this envelope.
/// On success: `{"success": true, "data": {...}}`,
/// on failure: `{"success": false, "data": null, "error": "message"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` when the request succeeded
    pub success: bool,
    /// Payload. `null` on error
    pub data: Option<T>,
    /// Error description. Omitted on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ApiResponse<()>>);

/// Translate a service error into an HTTP status and envelope.
///
/// Infrastructure failures are logged here and answered with a generic
/// message.
pub fn error_response(err: AppError) -> ApiError {
    match err {
        AppError::Domain(DomainError::PostNotFound { post_id }) => {
            let message = DomainError::PostNotFound { post_id }.to_string();
            (StatusCode::NOT_FOUND, Json(ApiResponse::error(message)))
        }
        AppError::Domain(e @ DomainError::Validation(_)) => {
            (StatusCode::BAD_REQUEST, Json(ApiResponse::error(e.to_string())))
        }
        AppError::Infra(e) => {
            error!("Request failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Internal storage error")),
            )
        }
    }
}
