//! Cross-resource query payloads.

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::object::StoredObject;
use super::task::Task;

/// Entities, tasks and objects returned together by the query endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub entities: Vec<Entity>,

    #[serde(default)]
    pub tasks: Vec<Task>,

    #[serde(default)]
    pub objects: Vec<StoredObject>,
}

impl Dataset {
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.tasks.is_empty() && self.objects.is_empty()
    }
}

/// Per-resource limits for `GET /queries/full`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FullDataset {
    pub entity_limit: Option<u32>,
    pub task_limit: Option<u32>,
    pub object_limit: Option<u32>,
}

/// Response from `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,

    #[serde(default)]
    pub version: Option<String>,
}
