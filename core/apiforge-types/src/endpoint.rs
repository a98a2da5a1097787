//! Per-resource, per-operation endpoint enablement.
//!
//! Both protocol adapters and the documentation exporters consult the same
//! gate. A resource with no explicit configuration has every operation
//! enabled, so uploads work out of the box.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The six gateable operations on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListItems,
    CreateItem,
    GetItem,
    ReplaceItem,
    MergeItem,
    DeleteItem,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::ListItems => "GET collection",
            Operation::CreateItem => "POST collection",
            Operation::GetItem => "GET item",
            Operation::ReplaceItem => "PUT item",
            Operation::MergeItem => "PATCH item",
            Operation::DeleteItem => "DELETE item",
        };
        write!(f, "{name}")
    }
}

fn enabled() -> bool {
    true
}

/// Enablement flags for one resource. Missing flags deserialize to `true`
/// so partial configs only disable what they name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    #[serde(default = "enabled")]
    pub get_collection: bool,
    #[serde(default = "enabled")]
    pub post_collection: bool,
    #[serde(default = "enabled")]
    pub get_item: bool,
    #[serde(default = "enabled")]
    pub put_item: bool,
    #[serde(default = "enabled")]
    pub patch_item: bool,
    #[serde(default = "enabled")]
    pub delete_item: bool,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            get_collection: true,
            post_collection: true,
            get_item: true,
            put_item: true,
            patch_item: true,
            delete_item: true,
        }
    }
}

impl EndpointConfig {
    /// Returns whether the given operation is enabled.
    #[must_use]
    pub fn allows(&self, operation: Operation) -> bool {
        match operation {
            Operation::ListItems => self.get_collection,
            Operation::CreateItem => self.post_collection,
            Operation::GetItem => self.get_item,
            Operation::ReplaceItem => self.put_item,
            Operation::MergeItem => self.patch_item,
            Operation::DeleteItem => self.delete_item,
        }
    }
}

/// The full gate: resource name → config. Absent resources are fully
/// enabled (backward-compatible default).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndpointPolicy {
    configs: HashMap<String, EndpointConfig>,
}

impl EndpointPolicy {
    /// Creates an empty policy (everything enabled).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether an operation is enabled for a resource.
    #[must_use]
    pub fn is_enabled(&self, resource: &str, operation: Operation) -> bool {
        self.configs
            .get(resource)
            .map(|config| config.allows(operation))
            .unwrap_or(true)
    }

    /// Returns the effective config for a resource.
    #[must_use]
    pub fn config_for(&self, resource: &str) -> EndpointConfig {
        self.configs.get(resource).copied().unwrap_or_default()
    }

    /// Sets the config for a resource.
    pub fn set(&mut self, resource: impl Into<String>, config: EndpointConfig) {
        self.configs.insert(resource.into(), config);
    }

    /// Iterates over explicitly configured resources.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &EndpointConfig)> {
        self.configs.iter()
    }
}
