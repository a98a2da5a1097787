//! Timestamp injection policy.
//!
//! `createdAt` / `updatedAt` are synthetic fields the resolver maintains
//! on items. A field may only be injected when the per-item schema either
//! declares it explicitly or allows additional properties; and when the
//! injected field is not declared, validation must run against a schema
//! copy augmented with a `{type: string, format: date-time}` property so
//! the synthetic field is not spuriously rejected.

use chrono::{SecondsFormat, Utc};
use serde_json::{Value, json};

/// The synthetic fields, in injection order.
pub const TIMESTAMP_FIELDS: [&str; 2] = ["createdAt", "updatedAt"];

/// Whether each synthetic field may be added to items of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampPolicy {
    pub can_add_created_at: bool,
    pub can_add_updated_at: bool,
}

/// Computes the injection policy for a per-item schema.
///
/// A non-object schema (absent, boolean `true`) is open and permits both.
#[must_use]
pub fn timestamp_policy(item_schema: &Value) -> TimestampPolicy {
    TimestampPolicy {
        can_add_created_at: may_inject(item_schema, "createdAt"),
        can_add_updated_at: may_inject(item_schema, "updatedAt"),
    }
}

fn may_inject(schema: &Value, field: &str) -> bool {
    declares(schema, field) || allows_additional(schema)
}

/// Whether the schema explicitly declares a property.
fn declares(schema: &Value, field: &str) -> bool {
    schema
        .get("properties")
        .and_then(|properties| properties.get(field))
        .is_some()
}

/// `additionalProperties` defaults to open; only the literal `false`
/// closes the schema.
fn allows_additional(schema: &Value) -> bool {
    schema.get("additionalProperties") != Some(&Value::Bool(false))
}

/// Returns a copy of `schema` that declares `field` as an RFC 3339
/// date-time string, for validating items carrying an undeclared
/// synthetic field. Non-object schemas are returned unchanged.
#[must_use]
pub fn augment_with_timestamp(schema: &Value, field: &str) -> Value {
    if declares(schema, field) {
        return schema.clone();
    }
    let Some(obj) = schema.as_object() else {
        return schema.clone();
    };
    let mut augmented = obj.clone();
    let properties = augmented
        .entry("properties")
        .or_insert_with(|| json!({}));
    if let Some(properties) = properties.as_object_mut() {
        properties.insert(
            field.to_string(),
            json!({"type": "string", "format": "date-time"}),
        );
    }
    Value::Object(augmented)
}

/// The current instant as an RFC 3339 string with millisecond precision.
#[must_use]
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
