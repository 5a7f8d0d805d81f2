//! Task payloads.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::components::TaskComponents;

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Acknowledged,
    InProgress,
    Completed,
    Failed,
    Cancelled,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Acknowledged => "acknowledged",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether the task can no longer change state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "acknowledged" => Ok(Self::Acknowledged),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("unknown task status: {}", other)),
        }
    }
}

/// Task as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub task_id: String,

    pub status: TaskStatus,

    #[serde(default)]
    pub entity_id: Option<String>,

    #[serde(default)]
    pub components: TaskComponents,

    #[serde(default)]
    pub extra: Option<Value>,

    #[serde(default)]
    pub error_message: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Request to create a task.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub task_id: String,
    pub status: Option<TaskStatus>,
    pub entity_id: Option<String>,
    pub components: Option<TaskComponents>,
    pub extra: Option<Value>,
}

impl NewTask {
    pub fn new(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            status: None,
            entity_id: None,
            components: None,
            extra: None,
        }
    }

    pub fn for_entity(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_components(mut self, components: TaskComponents) -> Self {
        self.components = Some(components);
        self
    }

    pub fn with_extra(mut self, extra: Value) -> Self {
        self.extra = Some(extra);
        self
    }
}

/// Partial task update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskUpdate {
    pub status: Option<TaskStatus>,
    pub entity_id: Option<String>,
    pub components: Option<TaskComponents>,
    pub extra: Option<Value>,
}

/// Filters for task listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListTasks {
    pub status: Option<TaskStatus>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_value(TaskStatus::InProgress).unwrap(),
            "in_progress"
        );
        assert_eq!(TaskStatus::InProgress.to_string(), "in_progress");
        assert_eq!("cancelled".parse::<TaskStatus>(), Ok(TaskStatus::Cancelled));
        assert!("running".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_terminal_states() {
        assert!(TaskStatus::Completed.is_terminal());
        assert!(TaskStatus::Failed.is_terminal());
        assert!(!TaskStatus::Acknowledged.is_terminal());
    }

    #[test]
    fn test_task_defaults_when_fields_missing() {
        let task: Task =
            serde_json::from_value(serde_json::json!({ "task_id": "t-1", "status": "pending" }))
                .unwrap();
        assert_eq!(task.components, TaskComponents::default());
        assert!(task.entity_id.is_none());
    }
}
