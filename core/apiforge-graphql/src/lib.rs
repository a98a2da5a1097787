//! GraphQL synthesis for apiforge.
//!
//! No GraphQL types are ever declared by the user: the schema is inferred
//! from sample data. For each resource with at least one sample item this
//! crate derives an object type (fields typed from the first item), an
//! input type (same fields minus identity and timestamp fields), query
//! fields for the collection and a single item, and create/update/delete
//! mutations — all wired to the store's resource resolver.
//!
//! The rendered schema text is a pure function of the snapshot; its
//! SHA-256 keys a cache so an unchanged store never rebuilds the
//! executable schema. Any generation failure serves a minimal fallback
//! schema instead of crashing the adapter.

mod cache;
mod infer;
mod inflect;
mod sdl;
mod synth;

pub use cache::{GeneratedSchema, SchemaCache};
pub use infer::{FieldKind, infer_type};
pub use inflect::{singularize, type_name};
pub use sdl::{ResourcePlan, plan_resources, render_sdl};
pub use synth::{build_schema, fallback_schema};
