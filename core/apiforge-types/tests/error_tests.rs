use apiforge_types::{ApiError, Operation};

#[test]
fn codes_are_stable() {
    assert_eq!(ApiError::NoDataAvailable.code(), "NO_DATA_AVAILABLE");
    assert_eq!(
        ApiError::ResourceNotFound("users".into()).code(),
        "RESOURCE_NOT_FOUND"
    );
    assert_eq!(
        ApiError::SchemaValidationFailed(vec![]).code(),
        "SCHEMA_VALIDATION_FAILED"
    );
    assert_eq!(ApiError::Internal("boom".into()).code(), "INTERNAL_ERROR");
}

#[test]
fn display_names_resource_and_operation() {
    let err = ApiError::EndpointDisabled {
        resource: "users".into(),
        operation: Operation::DeleteItem,
    };
    assert_eq!(
        err.to_string(),
        "endpoint 'DELETE item' is disabled for resource 'users'"
    );
}

#[test]
fn item_not_found_names_both_ids() {
    let err = ApiError::ItemNotFound {
        resource: "posts".into(),
        id: "42".into(),
    };
    assert_eq!(err.to_string(), "item '42' not found in resource 'posts'");
}
