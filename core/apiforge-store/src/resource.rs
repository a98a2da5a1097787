//! The resource resolver: list/get/create/replace/merge/remove over a
//! resource array, shared by both protocol adapters.
//!
//! Semantics:
//! - create generates an id (1 + max numeric id) when none of the
//!   identity fields is present, and injects timestamps per policy
//! - replace is index-stable and forces identity fields and `createdAt`
//!   from the existing item
//! - merge carries all existing fields forward, overlays the partial
//!   body, then re-asserts identity fields and `createdAt`
//! - remove filters the item out and returns it

use crate::service::{StoreService, StoreState};
use crate::snapshot::StoreSnapshot;
use apiforge_schema::{augment_with_timestamp, now_rfc3339, timestamp_policy, validate};
use apiforge_types::{
    ApiError, ApiResult, ID_FIELDS, JsonObject, Operation, ids_match, resolve_identity,
};
use serde_json::Value;

impl StoreService {
    /// Returns the resource's item sequence verbatim.
    pub async fn list(&self, resource: &str) -> ApiResult<Vec<Value>> {
        let state = self.state.read().await;
        Self::ensure_ready(&state.snapshot)?;
        Self::ensure_enabled(&state.endpoints, resource, Operation::ListItems)?;
        Ok(collection(&state.snapshot, resource)?.clone())
    }

    /// Finds one item by identity.
    pub async fn get(&self, resource: &str, id: &str) -> ApiResult<Value> {
        let state = self.state.read().await;
        Self::ensure_ready(&state.snapshot)?;
        Self::ensure_enabled(&state.endpoints, resource, Operation::GetItem)?;
        let items = collection(&state.snapshot, resource)?;
        let index = find_index(items, id).ok_or_else(|| not_found(resource, id))?;
        Ok(items[index].clone())
    }

    /// Appends a new item, generating an id and injecting timestamps as
    /// the schema permits.
    pub async fn create(&self, resource: &str, body: Value) -> ApiResult<Value> {
        let mut state = self.state.write().await;
        Self::ensure_ready(&state.snapshot)?;
        Self::ensure_enabled(&state.endpoints, resource, Operation::CreateItem)?;
        let mut items = collection(&state.snapshot, resource)?.clone();

        let mut item = object_body(body)?;
        let has_identity = ID_FIELDS
            .iter()
            .any(|field| item.get(*field).is_some_and(|value| !value.is_null()));
        if !has_identity {
            item.insert("id".to_string(), Value::from(next_id(&items)));
        }

        let item_schema = state.snapshot.item_schema(resource);
        let policy = timestamp_policy(&item_schema);
        let now = now_rfc3339();
        let mut injected = Vec::new();
        if policy.can_add_created_at {
            item.insert("createdAt".to_string(), Value::String(now.clone()));
            injected.push("createdAt");
        }
        if policy.can_add_updated_at {
            item.insert("updatedAt".to_string(), Value::String(now.clone()));
            injected.push("updatedAt");
        }

        let stored = Value::Object(item);
        validate_item(&stored, &item_schema, &injected)?;

        items.push(stored.clone());
        self.commit(&mut state, resource, items, now)?;
        Ok(stored)
    }

    /// Replaces an existing item in place (index-stable).
    pub async fn replace(&self, resource: &str, id: &str, body: Value) -> ApiResult<Value> {
        let mut state = self.state.write().await;
        Self::ensure_ready(&state.snapshot)?;
        Self::ensure_enabled(&state.endpoints, resource, Operation::ReplaceItem)?;
        let mut items = collection(&state.snapshot, resource)?.clone();
        let index = find_index(&items, id).ok_or_else(|| not_found(resource, id))?;
        let existing = existing_object(&items[index]);

        let mut item = object_body(body)?;
        let (item_schema, now, injected) =
            finalize_write(&mut item, &existing, &state.snapshot, resource);

        let stored = Value::Object(item);
        validate_item(&stored, &item_schema, &injected)?;

        items[index] = stored.clone();
        self.commit(&mut state, resource, items, now)?;
        Ok(stored)
    }

    /// Merges a partial body over an existing item; fields absent from
    /// the body are retained.
    pub async fn merge(&self, resource: &str, id: &str, partial: Value) -> ApiResult<Value> {
        let mut state = self.state.write().await;
        Self::ensure_ready(&state.snapshot)?;
        Self::ensure_enabled(&state.endpoints, resource, Operation::MergeItem)?;
        let mut items = collection(&state.snapshot, resource)?.clone();
        let index = find_index(&items, id).ok_or_else(|| not_found(resource, id))?;
        let existing = existing_object(&items[index]);

        let partial = object_body(partial)?;
        let mut item = existing.clone();
        for (key, value) in partial {
            item.insert(key, value);
        }
        let (item_schema, now, injected) =
            finalize_write(&mut item, &existing, &state.snapshot, resource);

        let stored = Value::Object(item);
        validate_item(&stored, &item_schema, &injected)?;

        items[index] = stored.clone();
        self.commit(&mut state, resource, items, now)?;
        Ok(stored)
    }

    /// Removes an item and returns it; later items shift down.
    pub async fn remove(&self, resource: &str, id: &str) -> ApiResult<Value> {
        let mut state = self.state.write().await;
        Self::ensure_ready(&state.snapshot)?;
        Self::ensure_enabled(&state.endpoints, resource, Operation::DeleteItem)?;
        let mut items = collection(&state.snapshot, resource)?.clone();
        let index = find_index(&items, id).ok_or_else(|| not_found(resource, id))?;
        let removed = items.remove(index);
        self.commit(&mut state, resource, items, now_rfc3339())?;
        Ok(removed)
    }

    fn commit(
        &self,
        state: &mut StoreState,
        resource: &str,
        items: Vec<Value>,
        timestamp: String,
    ) -> ApiResult<()> {
        let mut document = state.snapshot.document.clone();
        document.insert(resource.to_string(), Value::Array(items));
        state.snapshot = std::sync::Arc::new(StoreSnapshot::new(
            document,
            state.snapshot.schema.clone(),
            state.snapshot.is_valid,
            state.snapshot.errors.clone(),
            timestamp,
        ));
        self.persist(state)
    }
}

fn collection<'a>(snapshot: &'a StoreSnapshot, resource: &str) -> ApiResult<&'a Vec<Value>> {
    match snapshot.document.get(resource) {
        None => Err(ApiError::ResourceNotFound(resource.to_string())),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(ApiError::ResourceNotCollection(resource.to_string())),
    }
}

fn find_index(items: &[Value], id: &str) -> Option<usize> {
    items.iter().position(|item| {
        resolve_identity(item)
            .map(|identity| ids_match(&identity.value, id))
            .unwrap_or(false)
    })
}

fn not_found(resource: &str, id: &str) -> ApiError {
    ApiError::ItemNotFound {
        resource: resource.to_string(),
        id: id.to_string(),
    }
}

fn object_body(body: Value) -> ApiResult<JsonObject> {
    match body {
        Value::Object(map) => Ok(map),
        other => Err(ApiError::MalformedRequestBody(format!(
            "expected a JSON object, got {}",
            type_name(&other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// New id for a collection: 1 + the max of existing numeric ids;
/// non-numeric ids are ignored.
fn next_id(items: &[Value]) -> i64 {
    items
        .iter()
        .filter_map(|item| item.get("id"))
        .filter_map(Value::as_i64)
        .max()
        .unwrap_or(0)
        + 1
}

fn existing_object(item: &Value) -> JsonObject {
    item.as_object().cloned().unwrap_or_default()
}

/// Shared tail of replace/merge: re-asserts identity fields and
/// `createdAt` from the existing item, then regenerates `updatedAt` when
/// the schema permits. Returns the item schema, the write instant, and
/// the synthetic fields whose validation needs an augmented schema.
fn finalize_write(
    item: &mut JsonObject,
    existing: &JsonObject,
    snapshot: &StoreSnapshot,
    resource: &str,
) -> (Value, String, Vec<&'static str>) {
    for field in ID_FIELDS {
        match existing.get(field) {
            Some(value) => {
                item.insert(field.to_string(), value.clone());
            }
            None => {
                item.remove(field);
            }
        }
    }

    let mut injected = Vec::new();
    match existing.get("createdAt") {
        Some(value) => {
            item.insert("createdAt".to_string(), value.clone());
            injected.push("createdAt");
        }
        None => {
            item.remove("createdAt");
        }
    }

    let item_schema = snapshot.item_schema(resource);
    let policy = timestamp_policy(&item_schema);
    let now = now_rfc3339();
    if policy.can_add_updated_at {
        item.insert("updatedAt".to_string(), Value::String(now.clone()));
        injected.push("updatedAt");
    }

    (item_schema, now, injected)
}

fn validate_item(item: &Value, item_schema: &Value, injected: &[&str]) -> ApiResult<()> {
    let mut schema = item_schema.clone();
    for field in injected {
        schema = augment_with_timestamp(&schema, field);
    }
    let report = validate(item, &schema);
    if report.is_valid {
        Ok(())
    } else {
        Err(ApiError::SchemaValidationFailed(report.errors))
    }
}
