use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ConfigBag;

/// Opaque unique identifier of a task descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Generate a new random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Resolved representation of one unit of work.
///
/// Produced by the build stage and read-only from the moment it is handed to
/// the execution hook. Shared as `Arc<TaskDescriptor>`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDescriptor {
    /// Immutable identity.
    id: TaskId,
    /// Human-readable node name (e.g. `model.shop.orders`), used in logs and run ids.
    name: String,
    /// Resolved configuration.
    #[serde(default, skip_serializing_if = "ConfigBag::is_empty")]
    config: ConfigBag,
}

impl TaskDescriptor {
    /// Create a descriptor with a fresh identity.
    pub fn new(name: impl Into<String>, config: ConfigBag) -> Self {
        Self {
            id: TaskId::new(),
            name: name.into(),
            config,
        }
    }

    #[inline]
    pub fn id(&self) -> TaskId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn config(&self) -> &ConfigBag {
        &self.config
    }
}

impl fmt::Display for TaskDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.id)
    }
}
