//! Entity endpoints.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::components::prepare_entity_components;
use crate::error::AtlasResult;
use crate::transport::{Method, RequestBody};
use crate::types::{
    Checkin, CheckinResponse, Entity, EntityUpdate, ListEntities, ListTasks, NewEntity, Task,
    Telemetry,
};

use super::helpers::{require_id, QueryParams};
use super::AtlasCommandClient;

#[derive(Serialize)]
struct CreateEntityBody<'a> {
    entity_id: &'a str,
    entity_type: &'a str,
    alias: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    subtype: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    components: Option<Map<String, Value>>,
}

#[derive(Serialize)]
struct UpdateEntityBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    components: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subtype: Option<&'a str>,
}

impl ListEntities {
    pub(crate) fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .opt("entity_type", self.entity_type.as_deref())
            .opt("limit", self.limit)
            .opt("offset", self.offset)
    }
}

impl AtlasCommandClient {
    /// `POST /entities`
    ///
    /// Components are validated before anything is sent; an unknown key
    /// fails with `UnknownComponentKey` and no request is made.
    pub async fn create_entity(&self, entity: &NewEntity) -> AtlasResult<Entity> {
        require_id("entity_id", &entity.entity_id)?;
        let components = entity
            .components
            .as_ref()
            .map(prepare_entity_components)
            .transpose()?;

        let body = serde_json::to_value(CreateEntityBody {
            entity_id: &entity.entity_id,
            entity_type: &entity.entity_type,
            alias: &entity.alias,
            subtype: entity.subtype.as_deref(),
            components,
        })?;

        debug!(entity_id = %entity.entity_id, "creating entity");
        self.call(
            Method::POST,
            &["entities"],
            QueryParams::new(),
            RequestBody::Json(body),
        )
        .await
    }

    /// `GET /entities`
    pub async fn list_entities(&self, filter: &ListEntities) -> AtlasResult<Vec<Entity>> {
        self.call(
            Method::GET,
            &["entities"],
            filter.to_query(),
            RequestBody::Empty,
        )
        .await
    }

    /// `GET /entities/{entity_id}`
    pub async fn get_entity(&self, entity_id: &str) -> AtlasResult<Entity> {
        let entity_id = require_id("entity_id", entity_id)?;
        self.call(
            Method::GET,
            &["entities", entity_id],
            QueryParams::new(),
            RequestBody::Empty,
        )
        .await
    }

    /// `GET /entities/alias/{alias}`
    pub async fn get_entity_by_alias(&self, alias: &str) -> AtlasResult<Entity> {
        let alias = require_id("alias", alias)?;
        self.call(
            Method::GET,
            &["entities", "alias", alias],
            QueryParams::new(),
            RequestBody::Empty,
        )
        .await
    }

    /// `PATCH /entities/{entity_id}`
    pub async fn update_entity(
        &self,
        entity_id: &str,
        update: &EntityUpdate,
    ) -> AtlasResult<Entity> {
        let entity_id = require_id("entity_id", entity_id)?;
        let components = update
            .components
            .as_ref()
            .map(prepare_entity_components)
            .transpose()?;

        let body = serde_json::to_value(UpdateEntityBody {
            components,
            subtype: update.subtype.as_deref(),
        })?;

        debug!(entity_id = %entity_id, "updating entity");
        self.call(
            Method::PATCH,
            &["entities", entity_id],
            QueryParams::new(),
            RequestBody::Json(body),
        )
        .await
    }

    /// `DELETE /entities/{entity_id}`
    pub async fn delete_entity(&self, entity_id: &str) -> AtlasResult<()> {
        let entity_id = require_id("entity_id", entity_id)?;
        debug!(entity_id = %entity_id, "deleting entity");
        self.call_unit(
            Method::DELETE,
            &["entities", entity_id],
            QueryParams::new(),
            RequestBody::Empty,
        )
        .await
    }

    /// `PATCH /entities/{entity_id}/telemetry`
    pub async fn update_entity_telemetry(
        &self,
        entity_id: &str,
        telemetry: &Telemetry,
    ) -> AtlasResult<Entity> {
        let entity_id = require_id("entity_id", entity_id)?;
        let body = serde_json::to_value(telemetry)?;

        self.call(
            Method::PATCH,
            &["entities", entity_id, "telemetry"],
            QueryParams::new(),
            RequestBody::Json(body),
        )
        .await
    }

    /// `POST /entities/{entity_id}/checkin`
    pub async fn checkin_entity(
        &self,
        entity_id: &str,
        checkin: &Checkin,
    ) -> AtlasResult<CheckinResponse> {
        let entity_id = require_id("entity_id", entity_id)?;
        let body = serde_json::to_value(checkin)?;

        debug!(entity_id = %entity_id, "checking in entity");
        self.call(
            Method::POST,
            &["entities", entity_id, "checkin"],
            QueryParams::new(),
            RequestBody::Json(body),
        )
        .await
    }

    /// `GET /entities/{entity_id}/tasks`
    pub async fn get_tasks_by_entity(
        &self,
        entity_id: &str,
        filter: &ListTasks,
    ) -> AtlasResult<Vec<Task>> {
        let entity_id = require_id("entity_id", entity_id)?;
        self.call(
            Method::GET,
            &["entities", entity_id, "tasks"],
            filter.to_query(),
            RequestBody::Empty,
        )
        .await
    }
}
