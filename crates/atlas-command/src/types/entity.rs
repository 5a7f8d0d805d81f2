//! Entity payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::components::EntityComponents;
use super::task::{Task, TaskStatus};

/// Entity as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub entity_id: String,

    pub entity_type: String,

    pub alias: String,

    #[serde(default)]
    pub subtype: Option<String>,

    #[serde(default)]
    pub components: EntityComponents,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request to create an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntity {
    pub entity_id: String,
    pub entity_type: String,
    pub alias: String,
    pub subtype: Option<String>,
    pub components: Option<EntityComponents>,
}

impl NewEntity {
    pub fn new(
        entity_id: impl Into<String>,
        entity_type: impl Into<String>,
        alias: impl Into<String>,
    ) -> Self {
        Self {
            entity_id: entity_id.into(),
            entity_type: entity_type.into(),
            alias: alias.into(),
            subtype: None,
            components: None,
        }
    }

    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = Some(subtype.into());
        self
    }

    pub fn with_components(mut self, components: EntityComponents) -> Self {
        self.components = Some(components);
        self
    }
}

/// Partial entity update. Absent fields are left unchanged on the server.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityUpdate {
    pub components: Option<EntityComponents>,
    pub subtype: Option<String>,
}

/// Filters for `GET /entities`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListEntities {
    pub entity_type: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Check-in report from an asset; the response carries tasks to pick up.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Checkin {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude_m: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_m_s: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_deg: Option<f64>,

    /// Only return tasks in this state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_filter: Option<TaskStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    /// Only return tasks changed after this instant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckinResponse {
    pub entity: Entity,

    #[serde(default)]
    pub tasks: Vec<Task>,
}
