//! REST handlers.

use crate::AppState;
use crate::error::{ErrorResponse, into_response};
use apiforge_store::SubmitOutcome;
use apiforge_types::{ApiError, EndpointConfig};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Body of a validation submission.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub data: Value,
    pub schema: Value,
}

/// The snapshot projection consumed by the documentation exporters.
#[derive(Debug, Serialize)]
pub struct SnapshotResponse {
    pub document: Value,
    pub schema: Value,
    #[serde(rename = "isValid")]
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub resources: Vec<String>,
    pub timestamp: String,
    pub endpoints: BTreeMap<String, EndpointConfig>,
}

/// Unwraps a JSON body, mapping extractor rejections into the taxonomy
/// so malformed JSON gets the standard `{error}` shape.
fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ErrorResponse> {
    body.map(|Json(value)| value)
        .map_err(|rejection| into_response(ApiError::MalformedRequestBody(rejection.to_string())))
}

// ── Validation submission boundary ───────────────────────────────

pub async fn submit(
    State(app): State<AppState>,
    body: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<Json<SubmitOutcome>, ErrorResponse> {
    let Json(request) = body.map_err(|rejection| {
        into_response(ApiError::MalformedRequestBody(rejection.to_string()))
    })?;
    let outcome = app
        .store
        .submit(request.data, request.schema)
        .await
        .map_err(into_response)?;
    Ok(Json(outcome))
}

pub async fn clear(State(app): State<AppState>) -> Result<StatusCode, ErrorResponse> {
    app.store.clear().await.map_err(into_response)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn snapshot(State(app): State<AppState>) -> Json<SnapshotResponse> {
    let snapshot = app.store.snapshot().await;
    let policy = app.store.endpoint_policy().await;
    let endpoints = snapshot
        .resources
        .iter()
        .map(|resource| (resource.clone(), policy.config_for(resource)))
        .collect();
    Json(SnapshotResponse {
        document: Value::Object(snapshot.document.clone()),
        schema: snapshot.schema.clone(),
        is_valid: snapshot.is_valid,
        errors: snapshot.errors.clone(),
        resources: snapshot.resources.clone(),
        timestamp: snapshot.timestamp.clone(),
        endpoints,
    })
}

// ── Endpoint gate config ─────────────────────────────────────────

pub async fn endpoint_configs(
    State(app): State<AppState>,
) -> Json<BTreeMap<String, EndpointConfig>> {
    let snapshot = app.store.snapshot().await;
    let policy = app.store.endpoint_policy().await;
    Json(
        snapshot
            .resources
            .iter()
            .map(|resource| (resource.clone(), policy.config_for(resource)))
            .collect(),
    )
}

pub async fn set_endpoint_config(
    State(app): State<AppState>,
    Path(resource): Path<String>,
    body: Result<Json<EndpointConfig>, JsonRejection>,
) -> Result<Json<EndpointConfig>, ErrorResponse> {
    let Json(config) = body.map_err(|rejection| {
        into_response(ApiError::MalformedRequestBody(rejection.to_string()))
    })?;
    app.store
        .set_endpoint_config(&resource, config)
        .await
        .map_err(into_response)?;
    Ok(Json(config))
}

// ── CRUD ─────────────────────────────────────────────────────────

pub async fn list_items(
    State(app): State<AppState>,
    Path(resource): Path<String>,
) -> Result<Json<Vec<Value>>, ErrorResponse> {
    app.store
        .list(&resource)
        .await
        .map(Json)
        .map_err(into_response)
}

pub async fn create_item(
    State(app): State<AppState>,
    Path(resource): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ErrorResponse> {
    let body = json_body(body)?;
    let created = app
        .store
        .create(&resource, body)
        .await
        .map_err(into_response)?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_item(
    State(app): State<AppState>,
    Path((resource, id)): Path<(String, String)>,
) -> Result<Json<Value>, ErrorResponse> {
    app.store
        .get(&resource, &id)
        .await
        .map(Json)
        .map_err(into_response)
}

pub async fn replace_item(
    State(app): State<AppState>,
    Path((resource, id)): Path<(String, String)>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ErrorResponse> {
    let body = json_body(body)?;
    app.store
        .replace(&resource, &id, body)
        .await
        .map(Json)
        .map_err(into_response)
}

pub async fn merge_item(
    State(app): State<AppState>,
    Path((resource, id)): Path<(String, String)>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ErrorResponse> {
    let body = json_body(body)?;
    app.store
        .merge(&resource, &id, body)
        .await
        .map(Json)
        .map_err(into_response)
}

pub async fn delete_item(
    State(app): State<AppState>,
    Path((resource, id)): Path<(String, String)>,
) -> Result<Json<Value>, ErrorResponse> {
    app.store
        .remove(&resource, &id)
        .await
        .map(Json)
        .map_err(into_response)
}
