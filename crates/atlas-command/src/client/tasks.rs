//! Task endpoints.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::components::{prepare_components, strip_nulls};
use crate::error::AtlasResult;
use crate::transport::{Method, RequestBody};
use crate::types::{ListTasks, NewTask, Task, TaskStatus, TaskUpdate};

use super::helpers::{require_id, QueryParams};
use super::AtlasCommandClient;

#[derive(Serialize)]
struct TaskBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    task_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    entity_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    components: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    extra: Option<Value>,
}

impl ListTasks {
    pub(crate) fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .opt("status", self.status)
            .opt("limit", self.limit)
            .opt("offset", self.offset)
    }
}

impl AtlasCommandClient {
    /// `POST /tasks`
    pub async fn create_task(&self, task: &NewTask) -> AtlasResult<Task> {
        require_id("task_id", &task.task_id)?;
        let components = task
            .components
            .as_ref()
            .map(prepare_components)
            .transpose()?;

        let body = serde_json::to_value(TaskBody {
            task_id: Some(&task.task_id),
            status: task.status,
            entity_id: task.entity_id.as_deref(),
            components,
            extra: task.extra.as_ref().and_then(strip_nulls),
        })?;

        debug!(task_id = %task.task_id, "creating task");
        self.call(
            Method::POST,
            &["tasks"],
            QueryParams::new(),
            RequestBody::Json(body),
        )
        .await
    }

    /// `GET /tasks`
    pub async fn list_tasks(&self, filter: &ListTasks) -> AtlasResult<Vec<Task>> {
        self.call(Method::GET, &["tasks"], filter.to_query(), RequestBody::Empty)
            .await
    }

    /// `GET /tasks/{task_id}`
    pub async fn get_task(&self, task_id: &str) -> AtlasResult<Task> {
        let task_id = require_id("task_id", task_id)?;
        self.call(
            Method::GET,
            &["tasks", task_id],
            QueryParams::new(),
            RequestBody::Empty,
        )
        .await
    }

    /// `PATCH /tasks/{task_id}`
    pub async fn update_task(&self, task_id: &str, update: &TaskUpdate) -> AtlasResult<Task> {
        let task_id = require_id("task_id", task_id)?;
        let components = update
            .components
            .as_ref()
            .map(prepare_components)
            .transpose()?;

        let body = serde_json::to_value(TaskBody {
            task_id: None,
            status: update.status,
            entity_id: update.entity_id.as_deref(),
            components,
            extra: update.extra.as_ref().and_then(strip_nulls),
        })?;

        debug!(task_id = %task_id, "updating task");
        self.call(
            Method::PATCH,
            &["tasks", task_id],
            QueryParams::new(),
            RequestBody::Json(body),
        )
        .await
    }

    /// `DELETE /tasks/{task_id}`
    pub async fn delete_task(&self, task_id: &str) -> AtlasResult<()> {
        let task_id = require_id("task_id", task_id)?;
        debug!(task_id = %task_id, "deleting task");
        self.call_unit(
            Method::DELETE,
            &["tasks", task_id],
            QueryParams::new(),
            RequestBody::Empty,
        )
        .await
    }

    /// `POST /tasks/{task_id}/acknowledge`
    pub async fn acknowledge_task(&self, task_id: &str) -> AtlasResult<Task> {
        self.task_action(task_id, "acknowledge", Map::new()).await
    }

    /// `POST /tasks/{task_id}/start`
    pub async fn start_task(&self, task_id: &str) -> AtlasResult<Task> {
        self.task_action(task_id, "start", Map::new()).await
    }

    /// `POST /tasks/{task_id}/complete`
    pub async fn complete_task(&self, task_id: &str, result: Option<Value>) -> AtlasResult<Task> {
        let mut body = Map::new();
        if let Some(result) = result.as_ref().and_then(strip_nulls) {
            body.insert("result".to_string(), result);
        }
        self.task_action(task_id, "complete", body).await
    }

    /// `POST /tasks/{task_id}/fail`
    pub async fn fail_task(
        &self,
        task_id: &str,
        error_message: &str,
        error_details: Option<Value>,
    ) -> AtlasResult<Task> {
        let mut body = Map::new();
        body.insert(
            "error_message".to_string(),
            Value::String(error_message.to_string()),
        );
        if let Some(details) = error_details.as_ref().and_then(strip_nulls) {
            body.insert("error_details".to_string(), details);
        }
        self.task_action(task_id, "fail", body).await
    }

    async fn task_action(
        &self,
        task_id: &str,
        action: &str,
        body: Map<String, Value>,
    ) -> AtlasResult<Task> {
        let task_id = require_id("task_id", task_id)?;
        debug!(task_id = %task_id, action = action, "task transition");
        self.call(
            Method::POST,
            &["tasks", task_id, action],
            QueryParams::new(),
            RequestBody::Json(Value::Object(body)),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_tasks_query_uses_wire_status() {
        let filter = ListTasks {
            status: Some(TaskStatus::InProgress),
            limit: None,
            offset: Some(20),
        };
        let pairs: Vec<_> = filter
            .to_query()
            .pairs()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        assert_eq!(pairs, vec!["status=in_progress", "offset=20"]);
    }

    #[test]
    fn test_update_body_has_no_task_id() {
        let body = serde_json::to_value(TaskBody {
            task_id: None,
            status: Some(TaskStatus::Cancelled),
            entity_id: None,
            components: None,
            extra: None,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "status": "cancelled" }));
    }
}
