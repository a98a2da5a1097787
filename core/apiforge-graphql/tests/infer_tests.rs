use apiforge_graphql::{FieldKind, infer_type};
use pretty_assertions::assert_eq;
use serde_json::json;

// ── Scalars ──────────────────────────────────────────────────────

#[test]
fn scalars_map_directly() {
    assert_eq!(infer_type(&json!("hello")), FieldKind::Str);
    assert_eq!(infer_type(&json!(42)), FieldKind::Int);
    assert_eq!(infer_type(&json!(4.2)), FieldKind::Float);
    assert_eq!(infer_type(&json!(true)), FieldKind::Boolean);
}

#[test]
fn null_infers_as_string() {
    assert_eq!(infer_type(&json!(null)), FieldKind::Str);
}

#[test]
fn date_strings_stay_strings() {
    assert_eq!(infer_type(&json!("2024-01-15")), FieldKind::Str);
    assert_eq!(infer_type(&json!("2024-01-15T10:30:00Z")), FieldKind::Str);
}

// ── Arrays ───────────────────────────────────────────────────────

#[test]
fn arrays_take_element_type_from_first_element() {
    assert_eq!(
        infer_type(&json!([1, "two", 3])),
        FieldKind::List(Box::new(FieldKind::Int))
    );
}

#[test]
fn empty_arrays_default_to_string_elements() {
    assert_eq!(
        infer_type(&json!([])),
        FieldKind::List(Box::new(FieldKind::Str))
    );
}

// ── Objects ──────────────────────────────────────────────────────

#[test]
fn objects_infer_field_by_field() {
    let kind = infer_type(&json!({"name": "A", "age": 3}));
    assert_eq!(
        kind,
        FieldKind::Object(vec![
            ("name".to_string(), FieldKind::Str),
            ("age".to_string(), FieldKind::Int),
        ])
    );
}

// ── GraphQL mapping (complex collapses to String) ────────────────

#[test]
fn scalar_gql_types() {
    assert_eq!(infer_type(&json!("x")).gql_type(), "String");
    assert_eq!(infer_type(&json!(1)).gql_type(), "Int");
    assert_eq!(infer_type(&json!(1.5)).gql_type(), "Float");
    assert_eq!(infer_type(&json!(false)).gql_type(), "Boolean");
}

#[test]
fn scalar_lists_keep_their_element_type() {
    assert_eq!(infer_type(&json!(["a", "b"])).gql_type(), "[String]");
    assert_eq!(infer_type(&json!([1, 2])).gql_type(), "[Int]");
}

#[test]
fn complex_values_collapse_to_string() {
    assert_eq!(infer_type(&json!({"nested": true})).gql_type(), "String");
    assert_eq!(infer_type(&json!([{"id": 1}])).gql_type(), "[String]");
    assert_eq!(infer_type(&json!([[1, 2]])).gql_type(), "[String]");
}
