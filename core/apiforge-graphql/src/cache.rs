//! Content-hash cache over the synthesized schema.
//!
//! The rendered schema text is a pure function of the store snapshot, so
//! its SHA-256 works as the cache key: an unchanged store serves the
//! cached executable schema, any change to the document's shape or the
//! uploaded schema rebuilds lazily on the next request. Redundant
//! rebuilds under races are harmless; last write wins on the slot.

use crate::sdl::{plan_resources, render_sdl};
use crate::synth::{build_schema, fallback_schema, fallback_sdl};
use apiforge_store::StoreService;
use async_graphql::dynamic::Schema;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error};

/// A ready-to-serve schema plus the text it was generated from.
#[derive(Clone)]
pub struct GeneratedSchema {
    pub sdl: String,
    pub schema: Schema,
}

struct CachedSchema {
    hash: [u8; 32],
    generated: GeneratedSchema,
}

/// Lazily rebuilt, hash-keyed schema cache.
#[derive(Default)]
pub struct SchemaCache {
    inner: RwLock<Option<CachedSchema>>,
}

impl SchemaCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the schema for the store's current snapshot, rebuilding
    /// only when the generated schema text changed.
    pub async fn current(&self, store: &Arc<StoreService>) -> GeneratedSchema {
        let snapshot = store.snapshot().await;

        let (mut sdl, plans) = if snapshot.is_valid {
            let plans = plan_resources(&snapshot.document);
            if plans.is_empty() {
                (fallback_sdl(), None)
            } else {
                (render_sdl(&plans), Some(plans))
            }
        } else {
            (fallback_sdl(), None)
        };

        let hash: [u8; 32] = Sha256::digest(sdl.as_bytes()).into();
        {
            let cached = self.inner.read().await;
            if let Some(cached) = cached.as_ref() {
                if cached.hash == hash {
                    return cached.generated.clone();
                }
            }
        }

        let schema = match plans {
            Some(plans) => match build_schema(&plans, store.clone()) {
                Ok(schema) => schema,
                Err(err) => {
                    error!(error = %err, "schema generation failed, serving fallback");
                    sdl = fallback_sdl();
                    fallback_schema(&format!("schema generation failed: {err}"))
                }
            },
            None => fallback_schema("no data available; upload and validate a document first"),
        };

        debug!(hash = %hex::encode(&hash[..8]), "rebuilt GraphQL schema");
        let generated = GeneratedSchema { sdl, schema };
        *self.inner.write().await = Some(CachedSchema {
            hash,
            generated: generated.clone(),
        });
        generated
    }
}
