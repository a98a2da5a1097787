//! Snapshot store and resource resolver for apiforge.
//!
//! The [`StoreService`] owns all mutable state: the current
//! [`StoreSnapshot`] (document + schema + validity) and the endpoint
//! policy. Every mutation produces a complete new snapshot behind an
//! `Arc`; readers never observe a half-applied write. Mutations hold the
//! service's write lock across the whole read-compute-write-persist
//! cycle, so concurrent writers serialize instead of losing updates.
//!
//! State is disk-backed: a single JSON file written atomically (temp file
//! + rename) and reloaded on startup. [`StoreService::in_memory`] skips
//! the file for tests.

mod persist;
mod resource;
mod service;
mod snapshot;

pub use persist::PersistedState;
pub use service::StoreService;
pub use snapshot::{StoreSnapshot, SubmitOutcome};
