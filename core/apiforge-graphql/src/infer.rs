//! Type inference from example JSON values.
//!
//! The lattice is deliberately small: String, Int, Float, Boolean, lists
//! and one level of objects. Null infers as String. Arrays take their
//! element type from the first element only; empty arrays default to a
//! list of String. Strings that happen to parse as dates stay String —
//! preserved for compatibility, not a defect.

use serde_json::Value;

/// An inferred type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Str,
    Int,
    Float,
    Boolean,
    List(Box<FieldKind>),
    Object(Vec<(String, FieldKind)>),
}

/// Infers the type of an example value.
#[must_use]
pub fn infer_type(value: &Value) -> FieldKind {
    match value {
        Value::Null => FieldKind::Str,
        Value::Bool(_) => FieldKind::Boolean,
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                FieldKind::Int
            } else {
                FieldKind::Float
            }
        }
        Value::String(_) => FieldKind::Str,
        Value::Array(items) => FieldKind::List(Box::new(
            items.first().map(infer_type).unwrap_or(FieldKind::Str),
        )),
        Value::Object(map) => FieldKind::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), infer_type(value)))
                .collect(),
        ),
    }
}

impl FieldKind {
    /// Whether this is one of the four scalar kinds.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            FieldKind::Str | FieldKind::Int | FieldKind::Float | FieldKind::Boolean
        )
    }

    /// The GraphQL type expression this kind maps to. Nested objects and
    /// complex list elements collapse to String — object synthesis goes
    /// one level deep, no further.
    #[must_use]
    pub fn gql_type(&self) -> String {
        match self {
            FieldKind::Str => "String".to_string(),
            FieldKind::Int => "Int".to_string(),
            FieldKind::Float => "Float".to_string(),
            FieldKind::Boolean => "Boolean".to_string(),
            FieldKind::List(inner) => format!("[{}]", Self::element_name(inner)),
            FieldKind::Object(_) => "String".to_string(),
        }
    }

    /// The named element type of a list after collapse.
    #[must_use]
    pub fn element_name(inner: &FieldKind) -> &'static str {
        match inner {
            FieldKind::Str => "String",
            FieldKind::Int => "Int",
            FieldKind::Float => "Float",
            FieldKind::Boolean => "Boolean",
            FieldKind::List(_) | FieldKind::Object(_) => "String",
        }
    }
}
