//! The immutable point-in-time view of the store.

use apiforge_schema::now_rfc3339;
use apiforge_types::{JsonObject, resource_names};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A fully-formed view of the store. `resources` is always exactly the
/// array-valued top-level keys of `document`; `is_valid` stays false
/// until a validation submission has populated the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub document: JsonObject,
    pub schema: Value,
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub resources: Vec<String>,
    pub timestamp: String,
}

impl StoreSnapshot {
    /// The pristine snapshot: no document, invalid, no resources.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            document: JsonObject::new(),
            schema: Value::Null,
            is_valid: false,
            errors: Vec::new(),
            resources: Vec::new(),
            timestamp: now_rfc3339(),
        }
    }

    /// Builds a snapshot from its parts, deriving `resources`.
    #[must_use]
    pub fn new(
        document: JsonObject,
        schema: Value,
        is_valid: bool,
        errors: Vec<String>,
        timestamp: String,
    ) -> Self {
        Self {
            resources: resource_names(&document),
            document,
            schema,
            is_valid,
            errors,
            timestamp,
        }
    }

    /// The per-item schema for a resource
    /// (`schema.properties[resource].items`), or the open schema `true`
    /// when the schema does not describe the resource's items.
    #[must_use]
    pub fn item_schema(&self, resource: &str) -> Value {
        self.schema
            .get("properties")
            .and_then(|properties| properties.get(resource))
            .and_then(|resource_schema| resource_schema.get("items"))
            .cloned()
            .unwrap_or(Value::Bool(true))
    }
}

/// What a validation submission reports back to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitOutcome {
    #[serde(rename = "isValid")]
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub resources: Vec<String>,
}
