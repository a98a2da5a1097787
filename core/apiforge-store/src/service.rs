//! The store service: single owner of all mutable state.

use crate::persist::{self, PersistedState};
use crate::snapshot::{StoreSnapshot, SubmitOutcome};
use apiforge_schema::{now_rfc3339, validate};
use apiforge_types::{
    ApiError, ApiResult, EndpointConfig, EndpointPolicy, JsonObject, Operation,
};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

pub(crate) struct StoreState {
    pub snapshot: Arc<StoreSnapshot>,
    pub endpoints: EndpointPolicy,
}

/// Owns the snapshot and endpoint policy behind one lock. Reads clone an
/// `Arc`; mutations hold the write guard for the full
/// read-compute-write-persist cycle so they serialize.
pub struct StoreService {
    pub(crate) state: RwLock<StoreState>,
    path: Option<PathBuf>,
}

impl StoreService {
    /// Opens a disk-backed store, reloading prior state if the file
    /// exists and parses.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = match persist::load(&path) {
            Some(persisted) => {
                info!(path = %path.display(), "restored persisted store state");
                StoreState {
                    snapshot: Arc::new(persisted.snapshot),
                    endpoints: persisted.endpoints,
                }
            }
            None => StoreState {
                snapshot: Arc::new(StoreSnapshot::empty()),
                endpoints: EndpointPolicy::new(),
            },
        };
        Self {
            state: RwLock::new(state),
            path: Some(path),
        }
    }

    /// Opens a store with no backing file (for tests).
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            state: RwLock::new(StoreState {
                snapshot: Arc::new(StoreSnapshot::empty()),
                endpoints: EndpointPolicy::new(),
            }),
            path: None,
        }
    }

    /// The current snapshot.
    pub async fn snapshot(&self) -> Arc<StoreSnapshot> {
        self.state.read().await.snapshot.clone()
    }

    /// The current endpoint policy.
    pub async fn endpoint_policy(&self) -> EndpointPolicy {
        self.state.read().await.endpoints.clone()
    }

    /// Sets the gate config for one resource and persists it.
    pub async fn set_endpoint_config(
        &self,
        resource: &str,
        config: EndpointConfig,
    ) -> ApiResult<()> {
        let mut state = self.state.write().await;
        state.endpoints.set(resource, config);
        self.persist(&state)
    }

    /// Validates a (data, schema) submission and replaces the snapshot.
    ///
    /// An invalid submission is still recorded (with its errors); the
    /// CRUD surface only comes alive once `is_valid` is true.
    pub async fn submit(&self, data: Value, schema: Value) -> ApiResult<SubmitOutcome> {
        let report = validate(&data, &schema);
        let mut errors = report.errors;
        let mut is_valid = report.is_valid;

        let document = match data {
            Value::Object(map) => map,
            _ => {
                is_valid = false;
                errors.push("Document root must be a JSON object".to_string());
                JsonObject::new()
            }
        };

        let snapshot =
            StoreSnapshot::new(document, schema, is_valid, errors, now_rfc3339());
        let outcome = SubmitOutcome {
            is_valid: snapshot.is_valid,
            errors: snapshot.errors.clone(),
            resources: snapshot.resources.clone(),
        };

        let mut state = self.state.write().await;
        state.snapshot = Arc::new(snapshot);
        self.persist(&state)?;
        info!(
            valid = outcome.is_valid,
            resources = outcome.resources.len(),
            "document submitted"
        );
        Ok(outcome)
    }

    /// Resets to the pristine state and deletes the persisted file.
    pub async fn clear(&self) -> ApiResult<()> {
        let mut state = self.state.write().await;
        state.snapshot = Arc::new(StoreSnapshot::empty());
        state.endpoints = EndpointPolicy::new();
        if let Some(path) = &self.path {
            persist::remove(path).map_err(|err| {
                error!(error = %err, "failed to remove state file");
                ApiError::Internal(format!("failed to remove state file: {err}"))
            })?;
        }
        info!("store cleared");
        Ok(())
    }

    pub(crate) fn ensure_ready(snapshot: &StoreSnapshot) -> ApiResult<()> {
        if snapshot.is_valid {
            Ok(())
        } else {
            Err(ApiError::NoDataAvailable)
        }
    }

    pub(crate) fn ensure_enabled(
        endpoints: &EndpointPolicy,
        resource: &str,
        operation: Operation,
    ) -> ApiResult<()> {
        if endpoints.is_enabled(resource, operation) {
            Ok(())
        } else {
            Err(ApiError::EndpointDisabled {
                resource: resource.to_string(),
                operation,
            })
        }
    }

    pub(crate) fn persist(&self, state: &StoreState) -> ApiResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let persisted = PersistedState {
            snapshot: (*state.snapshot).clone(),
            endpoints: state.endpoints.clone(),
        };
        persist::save(path, &persisted).map_err(|err| {
            error!(path = %path.display(), error = %err, "failed to persist store state");
            ApiError::Internal(format!("failed to persist store state: {err}"))
        })
    }
}
