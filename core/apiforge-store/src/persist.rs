//! Atomic file persistence for the store state.
//!
//! The whole state (snapshot + endpoint policy) is one JSON file. Writes
//! go to a sibling temp file first and are renamed into place, so a crash
//! mid-write leaves the previous state intact.

use crate::snapshot::StoreSnapshot;
use apiforge_types::EndpointPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use tracing::warn;

/// Everything that survives a process restart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedState {
    pub snapshot: StoreSnapshot,
    pub endpoints: EndpointPolicy,
}

/// Loads persisted state. A missing file is a fresh start; a corrupt file
/// is logged and treated the same (the API resets to empty/invalid).
pub fn load(path: &Path) -> Option<PersistedState> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to read state file");
            return None;
        }
    };
    match serde_json::from_slice(&bytes) {
        Ok(state) => Some(state),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "state file is corrupt, starting empty");
            None
        }
    }
}

/// Writes the state atomically.
pub fn save(path: &Path, state: &PersistedState) -> io::Result<()> {
    let bytes = serde_json::to_vec_pretty(state).map_err(io::Error::other)?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)
}

/// Deletes the state file; missing is fine.
pub fn remove(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err),
        _ => Ok(()),
    }
}
