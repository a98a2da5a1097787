//! HTTP front end for apiforge.
//!
//! One router serves both protocol adapters over the same store:
//! - REST: `/api/{resource}` and `/api/{resource}/{id}`
//! - GraphQL: `/graphql` (schema regenerated lazily from the store)
//! - the validation submission boundary (`/api/validate`), store clear
//!   (`/api/data`), endpoint gate config (`/api/config/endpoints`), and
//!   the snapshot projection exporters consume (`/api/snapshot`)
//!
//! The path segments `validate`, `data`, `snapshot` and `config` are
//! reserved and shadow resources with those names.

mod analytics;
mod error;
mod graphql;
mod rest;

pub use analytics::{RequestEvent, log_request};
pub use error::ErrorBody;

use apiforge_graphql::SchemaCache;
use apiforge_store::StoreService;
use axum::routing::{delete, get, post, put};
use axum::{Router, middleware};
use std::sync::Arc;

/// Shared handler state: the store service and the GraphQL schema cache.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<StoreService>,
    pub graphql: Arc<SchemaCache>,
}

/// Builds the full API router over a store service.
pub fn build_router(store: Arc<StoreService>) -> Router {
    let state = AppState {
        store,
        graphql: Arc::new(SchemaCache::new()),
    };
    Router::new()
        .route("/api/validate", post(rest::submit))
        .route("/api/data", delete(rest::clear))
        .route("/api/snapshot", get(rest::snapshot))
        .route("/api/config/endpoints", get(rest::endpoint_configs))
        .route(
            "/api/config/endpoints/{resource}",
            put(rest::set_endpoint_config),
        )
        .route(
            "/api/{resource}",
            get(rest::list_items).post(rest::create_item),
        )
        .route(
            "/api/{resource}/{id}",
            get(rest::get_item)
                .put(rest::replace_item)
                .patch(rest::merge_item)
                .delete(rest::delete_item),
        )
        .route("/graphql", post(graphql::execute))
        .route("/graphql/sdl", get(graphql::sdl))
        .layer(middleware::from_fn(analytics::track))
        .with_state(state)
}
