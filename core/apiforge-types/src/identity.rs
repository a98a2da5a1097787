//! Item identity resolution.
//!
//! An item's identity is the first present of `id`, `_id`, `uuid`, checked
//! in that order. An `id` may be an integer or a string and must compare
//! across both representations: the string `"3"` matches the integer `3`.

use serde_json::Value;

/// Identity fields, in resolution order.
pub const ID_FIELDS: [&str; 3] = ["id", "_id", "uuid"];

/// The resolved identity of an item: which field carries it and its value.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityRef {
    pub field: &'static str,
    pub value: Value,
}

/// Resolves an item's identity by checking `id`, `_id`, `uuid` in order.
/// Returns `None` for non-object items or items with none of the fields.
pub fn resolve_identity(item: &Value) -> Option<IdentityRef> {
    let obj = item.as_object()?;
    for field in ID_FIELDS {
        if let Some(value) = obj.get(field) {
            if !value.is_null() {
                return Some(IdentityRef {
                    field,
                    value: value.clone(),
                });
            }
        }
    }
    None
}

/// Compares a stored identity value against a requested id string,
/// tolerating numeric vs string representations of the same value.
pub fn ids_match(candidate: &Value, requested: &str) -> bool {
    match candidate {
        Value::String(s) => s == requested,
        Value::Number(n) => {
            if n.to_string() == requested {
                return true;
            }
            match requested.parse::<f64>() {
                Ok(parsed) => n.as_f64() == Some(parsed),
                Err(_) => false,
            }
        }
        _ => false,
    }
}
