//! The shared error taxonomy.
//!
//! Every resolver operation returns one of these variants for expected
//! failure conditions; nothing in the engine panics or throws for
//! "not found" / "validation failed". Adapters convert to their protocol's
//! native representation (REST status codes, GraphQL `extensions.code`).

use crate::Operation;
use thiserror::Error;

/// Result type alias using the shared error taxonomy.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by the resolver and store operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No document has passed validation yet.
    #[error("no data available; upload and validate a document first")]
    NoDataAvailable,

    /// The operation is disabled for this resource by the endpoint gate.
    #[error("endpoint '{operation}' is disabled for resource '{resource}'")]
    EndpointDisabled {
        resource: String,
        operation: Operation,
    },

    /// The named top-level key does not exist in the document.
    #[error("resource '{0}' not found")]
    ResourceNotFound(String),

    /// The named top-level key exists but is not an array.
    #[error("'{0}' is not a collection")]
    ResourceNotCollection(String),

    /// No item with the requested identity exists in the resource.
    #[error("item '{id}' not found in resource '{resource}'")]
    ItemNotFound { resource: String, id: String },

    /// The request body is not usable (not JSON, not an object, ...).
    #[error("malformed request body: {0}")]
    MalformedRequestBody(String),

    /// The written item violates the per-item schema. Carries the
    /// field-qualified messages verbatim.
    #[error("schema validation failed")]
    SchemaValidationFailed(Vec<String>),

    /// Catch-all. Logged in full, reported to the caller generically.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Stable machine-readable code, used for GraphQL `extensions.code`.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NoDataAvailable => "NO_DATA_AVAILABLE",
            ApiError::EndpointDisabled { .. } => "ENDPOINT_DISABLED",
            ApiError::ResourceNotFound(_) => "RESOURCE_NOT_FOUND",
            ApiError::ResourceNotCollection(_) => "RESOURCE_NOT_COLLECTION",
            ApiError::ItemNotFound { .. } => "ITEM_NOT_FOUND",
            ApiError::MalformedRequestBody(_) => "MALFORMED_REQUEST_BODY",
            ApiError::SchemaValidationFailed(_) => "SCHEMA_VALIDATION_FAILED",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
