//! Helpers over the uploaded JSON document.
//!
//! A *resource* is a top-level array-valued key of the document. Key order
//! is preserved (serde_json `preserve_order`) and is the canonical order
//! in which resources and items are listed.

use serde_json::Value;

/// An ordered JSON object, as used for both documents and items.
pub type JsonObject = serde_json::Map<String, Value>;

/// Returns true if a top-level value qualifies as a resource collection.
pub fn is_resource_value(value: &Value) -> bool {
    value.is_array()
}

/// Extracts the resource names of a document: exactly its array-valued
/// top-level keys, in insertion order.
pub fn resource_names(document: &JsonObject) -> Vec<String> {
    document
        .iter()
        .filter(|(_, value)| is_resource_value(value))
        .map(|(key, _)| key.clone())
        .collect()
}
