//! Shared HTTP types

mod validated_json;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::shared::errors::DomainError;
use crate::shared::PaginatedResult;

pub use validated_json::{ValidatedJson, ValidatedJsonRejection};

/// Standard API response envelope.
///
/// Success: `{"success": true, "data": {...}}`,
/// failure: `{"success": false, "data": null, "error": "..."}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    /// `null` on error
    pub data: Option<T>,
    /// `null` on success
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

/// A page of items plus page metadata
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    /// Items across all pages
    pub total: u64,
    /// 1-based
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    /// Converts a domain page, mapping every item.
    pub fn from_result<D>(result: PaginatedResult<D>, map: impl FnMut(D) -> T) -> Self {
        Self {
            items: result.items.into_iter().map(map).collect(),
            total: result.total,
            page: result.page,
            limit: result.limit,
            total_pages: result.total_pages,
        }
    }
}

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ApiResponse<()>>);

pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP status a domain failure maps to.
pub fn error_status(err: &DomainError) -> StatusCode {
    match err {
        DomainError::NotFound { .. } | DomainError::VehicleNotFound(_) => StatusCode::NOT_FOUND,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        e if e.is_transient() => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::Validation(_)
        | DomainError::MissingVehicleReference
        | DomainError::UnrecognizedServiceType(_)
        | DomainError::MissingAmount(_)
        | DomainError::NegativeAmount => StatusCode::BAD_REQUEST,
    }
}

impl From<DomainError> for ApiResponse<()> {
    fn from(err: DomainError) -> Self {
        ApiResponse::error(err.to_string())
    }
}

/// Maps a domain failure onto the error envelope.
pub fn domain_error(err: DomainError) -> ApiError {
    let status = error_status(&err);
    if status.is_server_error() {
        error!(error = %err, "Request failed");
        return (status, Json(ApiResponse::error("Internal server error")));
    }
    (status, Json(err.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fee_errors_are_client_errors() {
        assert_eq!(
            error_status(&DomainError::MissingVehicleReference),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_status(&DomainError::UnrecognizedServiceType("parking".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_status(&DomainError::NegativeAmount),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_status(&DomainError::VehicleNotFound(3)),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn database_failures_are_hidden() {
        let (status, Json(body)) =
            domain_error(DomainError::Validation("Database error: locked".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.as_deref(), Some("Internal server error"));
    }

    #[test]
    fn conflict_maps_to_409() {
        let (status, Json(body)) = domain_error(DomainError::Conflict("dup".into()));
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(!body.success);
    }

    #[test]
    fn paginated_response_maps_items() {
        let page = PaginatedResult::new(vec![1, 2], 5, 1, 2);
        let resp = PaginatedResponse::from_result(page, |n| n * 10);
        assert_eq!(resp.items, vec![10, 20]);
        assert_eq!(resp.total_pages, 3);
    }
}
