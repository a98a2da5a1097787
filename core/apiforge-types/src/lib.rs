//! Core type definitions for apiforge.
//!
//! This crate defines the fundamental, protocol-agnostic types used
//! throughout the engine:
//! - Document helpers (a resource is a top-level array-valued key)
//! - Item identity resolution (`id` / `_id` / `uuid`)
//! - The per-resource, per-operation endpoint gate
//! - The shared error taxonomy ([`ApiError`])
//!
//! Protocol adapters (REST, GraphQL) and the store all speak these types;
//! nothing here depends on axum, async-graphql, or the validator.

mod document;
mod endpoint;
mod error;
mod identity;

pub use document::{JsonObject, is_resource_value, resource_names};
pub use endpoint::{EndpointConfig, EndpointPolicy, Operation};
pub use error::{ApiError, ApiResult};
pub use identity::{ID_FIELDS, IdentityRef, ids_match, resolve_identity};
