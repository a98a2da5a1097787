use apiforge_graphql::SchemaCache;
use apiforge_store::StoreService;
use apiforge_types::EndpointConfig;
use async_graphql::Request;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::sync::Arc;

async fn users_store() -> Arc<StoreService> {
    let store = Arc::new(StoreService::in_memory());
    let outcome = store
        .submit(
            json!({"users": [{"id": 1, "name": "A", "email": "a@b.com"}]}),
            json!({"type": "object"}),
        )
        .await
        .unwrap();
    assert!(outcome.is_valid);
    store
}

async fn execute(store: &Arc<StoreService>, cache: &SchemaCache, query: &str) -> Value {
    let generated = cache.current(store).await;
    let response = generated.schema.execute(Request::new(query)).await;
    serde_json::to_value(&response).unwrap()
}

// ── Queries ──────────────────────────────────────────────────────

#[tokio::test]
async fn collection_query_returns_all_items() {
    let store = users_store().await;
    let cache = SchemaCache::new();
    let response = execute(&store, &cache, "{ users { id name email } }").await;

    assert_eq!(response.get("errors"), None, "response: {response}");
    assert_eq!(
        response["data"]["users"],
        json!([{"id": 1, "name": "A", "email": "a@b.com"}])
    );
}

#[tokio::test]
async fn singular_query_finds_by_id() {
    let store = users_store().await;
    let cache = SchemaCache::new();
    let response = execute(&store, &cache, r#"{ user(id: "1") { name } }"#).await;
    assert_eq!(response["data"]["user"]["name"], json!("A"));
}

#[tokio::test]
async fn missing_item_surfaces_item_not_found() {
    let store = users_store().await;
    let cache = SchemaCache::new();
    let response = execute(&store, &cache, r#"{ user(id: "99") { name } }"#).await;
    assert_eq!(
        response["errors"][0]["extensions"]["code"],
        json!("ITEM_NOT_FOUND")
    );
}

#[tokio::test]
async fn empty_collection_resolves_to_empty_list_not_null() {
    let store = users_store().await;
    let cache = SchemaCache::new();
    // Take the schema first, then empty the collection underneath it.
    let generated = cache.current(&store).await;
    store.remove("users", "1").await.unwrap();

    let response = generated.schema.execute(Request::new("{ users { id } }")).await;
    let response = serde_json::to_value(&response).unwrap();
    assert_eq!(response.get("errors"), None, "response: {response}");
    assert_eq!(response["data"]["users"], json!([]));
}

// ── Mutations ────────────────────────────────────────────────────

#[tokio::test]
async fn create_mutation_appends_and_returns_the_item() {
    let store = users_store().await;
    let cache = SchemaCache::new();
    let response = execute(
        &store,
        &cache,
        r#"mutation { createUser(input: {name: "B", email: "b@b.com"}) { id name } }"#,
    )
    .await;
    assert_eq!(response.get("errors"), None, "response: {response}");
    assert_eq!(response["data"]["createUser"], json!({"id": 2, "name": "B"}));

    let items = store.list("users").await.unwrap();
    assert_eq!(items.len(), 2);
}

#[tokio::test]
async fn update_mutation_replaces_and_keeps_identity() {
    let store = users_store().await;
    let cache = SchemaCache::new();
    let response = execute(
        &store,
        &cache,
        r#"mutation { updateUser(id: "1", input: {name: "A2", email: "a2@b.com"}) { id name email } }"#,
    )
    .await;
    assert_eq!(
        response["data"]["updateUser"],
        json!({"id": 1, "name": "A2", "email": "a2@b.com"})
    );
}

#[tokio::test]
async fn delete_mutation_returns_true_and_removes() {
    let store = users_store().await;
    let cache = SchemaCache::new();
    let response = execute(&store, &cache, r#"mutation { deleteUser(id: "1") }"#).await;
    assert_eq!(response["data"]["deleteUser"], json!(true));
    assert!(store.list("users").await.unwrap().is_empty());
}

#[tokio::test]
async fn validation_failures_carry_details() {
    let store = Arc::new(StoreService::in_memory());
    store
        .submit(
            json!({"users": [{"id": 1, "name": "A", "email": "a@b.com"}]}),
            json!({
                "type": "object",
                "properties": {
                    "users": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "name": {"type": "string"},
                                "email": {"type": "string", "format": "email"}
                            }
                        }
                    }
                }
            }),
        )
        .await
        .unwrap();

    let cache = SchemaCache::new();
    let response = execute(
        &store,
        &cache,
        r#"mutation { createUser(input: {name: "B", email: "nope"}) { id } }"#,
    )
    .await;
    assert_eq!(
        response["errors"][0]["extensions"]["code"],
        json!("SCHEMA_VALIDATION_FAILED")
    );
    assert_eq!(
        response["errors"][0]["extensions"]["details"],
        json!(["email: Must be a valid email address"])
    );
}

// ── Gate ─────────────────────────────────────────────────────────

#[tokio::test]
async fn disabled_operation_reports_endpoint_disabled() {
    let store = users_store().await;
    store
        .set_endpoint_config(
            "users",
            EndpointConfig {
                delete_item: false,
                ..EndpointConfig::default()
            },
        )
        .await
        .unwrap();

    let cache = SchemaCache::new();
    let response = execute(&store, &cache, r#"mutation { deleteUser(id: "1") }"#).await;
    assert_eq!(
        response["errors"][0]["extensions"]["code"],
        json!("ENDPOINT_DISABLED")
    );
}

// ── Cache & fallback ─────────────────────────────────────────────

#[tokio::test]
async fn unchanged_store_serves_identical_sdl() {
    let store = users_store().await;
    let cache = SchemaCache::new();
    let first = cache.current(&store).await;
    // Data writes that keep the shape do not change the schema text.
    store
        .create("users", json!({"name": "B", "email": "b@b.com"}))
        .await
        .unwrap();
    let second = cache.current(&store).await;
    assert_eq!(first.sdl, second.sdl);
}

#[tokio::test]
async fn new_resource_shape_regenerates_the_schema() {
    let store = users_store().await;
    let cache = SchemaCache::new();
    let first = cache.current(&store).await;

    store
        .submit(
            json!({"posts": [{"id": 1, "title": "t"}]}),
            json!({"type": "object"}),
        )
        .await
        .unwrap();
    let second = cache.current(&store).await;
    assert_ne!(first.sdl, second.sdl);
    assert!(second.sdl.contains("type Post"));
}

#[tokio::test]
async fn empty_store_serves_the_fallback_schema() {
    let store = Arc::new(StoreService::in_memory());
    let cache = SchemaCache::new();
    let generated = cache.current(&store).await;
    assert_eq!(generated.sdl, "type Query {\n  error: String!\n}\n");

    let response = serde_json::to_value(
        &generated.schema.execute(Request::new("{ error }")).await,
    )
    .unwrap();
    assert_eq!(
        response["data"]["error"],
        json!("no data available; upload and validate a document first")
    );
}

#[tokio::test]
async fn introspection_is_enabled() {
    let store = users_store().await;
    let cache = SchemaCache::new();
    let response = execute(&store, &cache, "{ __schema { queryType { name } } }").await;
    assert_eq!(response["data"]["__schema"]["queryType"]["name"], json!("Query"));
}
