//! GraphQL adapter: one endpoint, schema synthesized from the store.

use crate::AppState;
use async_graphql::{Request, Response};
use axum::Json;
use axum::extract::State;

/// Executes a standard `{query, variables?, operationName?}` document
/// against the current synthesized schema. Introspection is always on.
pub async fn execute(
    State(app): State<AppState>,
    Json(request): Json<Request>,
) -> Json<Response> {
    let generated = app.graphql.current(&app.store).await;
    Json(generated.schema.execute(request).await)
}

/// The current schema text, as generated (or the fallback).
pub async fn sdl(State(app): State<AppState>) -> String {
    app.graphql.current(&app.store).await.sdl
}
