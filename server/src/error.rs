//! Conversion from the shared taxonomy to REST responses.

use apiforge_types::ApiError;
use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;
use tracing::error;

/// The REST error body: `{error, details?}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

pub type ErrorResponse = (StatusCode, Json<ErrorBody>);

/// Maps the taxonomy to 400/404/500. Validation messages are surfaced
/// verbatim in `details`; internal errors are logged in full and
/// reported generically.
pub fn into_response(err: ApiError) -> ErrorResponse {
    let status = match &err {
        ApiError::MalformedRequestBody(_)
        | ApiError::ResourceNotCollection(_)
        | ApiError::SchemaValidationFailed(_) => StatusCode::BAD_REQUEST,
        ApiError::NoDataAvailable
        | ApiError::ResourceNotFound(_)
        | ApiError::ItemNotFound { .. }
        | ApiError::EndpointDisabled { .. } => StatusCode::NOT_FOUND,
        ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let (error, details) = match err {
        ApiError::SchemaValidationFailed(errors) => {
            ("schema validation failed".to_string(), Some(errors))
        }
        ApiError::Internal(detail) => {
            error!(%detail, "internal error in REST handler");
            ("internal server error".to_string(), None)
        }
        other => (other.to_string(), None),
    };
    (status, Json(ErrorBody { error, details }))
}
