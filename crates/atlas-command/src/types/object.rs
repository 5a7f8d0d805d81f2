//! Stored object payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Object metadata as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredObject {
    pub object_id: String,

    #[serde(default)]
    pub path: Option<String>,

    #[serde(default)]
    pub bucket: Option<String>,

    #[serde(default)]
    pub size_bytes: Option<u64>,

    #[serde(default)]
    pub content_type: Option<String>,

    #[serde(default)]
    pub usage_hint: Option<String>,

    #[serde(default)]
    pub referenced_by: Vec<ObjectReference>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Link from an object to an entity and/or task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
}

impl ObjectReference {
    pub fn entity(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: Some(entity_id.into()),
            task_id: None,
        }
    }

    pub fn task(task_id: impl Into<String>) -> Self {
        Self {
            entity_id: None,
            task_id: Some(task_id.into()),
        }
    }

    /// A reference must name at least one target.
    pub fn is_empty(&self) -> bool {
        self.entity_id.is_none() && self.task_id.is_none()
    }
}

/// Multipart upload request.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadObject {
    pub object_id: String,
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
    pub usage_hint: Option<String>,
    pub referenced_by: Vec<ObjectReference>,
}

impl UploadObject {
    pub fn new(
        object_id: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            object_id: object_id.into(),
            file_name: file_name.into(),
            content_type: content_type.into(),
            data,
            usage_hint: None,
            referenced_by: Vec::new(),
        }
    }

    pub fn with_usage_hint(mut self, hint: impl Into<String>) -> Self {
        self.usage_hint = Some(hint.into());
        self
    }

    pub fn referenced_by(mut self, reference: ObjectReference) -> Self {
        self.referenced_by.push(reference);
        self
    }
}

/// Partial object metadata update.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ObjectUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_hint: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub referenced_by: Option<Vec<ObjectReference>>,
}

/// Filters for object listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListObjects {
    pub content_type: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Raw object bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectDownload {
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}
