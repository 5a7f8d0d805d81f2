//! Object storage endpoints.

use tracing::debug;

use crate::error::{AtlasError, AtlasResult};
use crate::transport::{Method, MultipartForm, RequestBody};
use crate::types::{
    ListObjects, ObjectDownload, ObjectReference, ObjectUpdate, StoredObject, UploadObject,
};

use super::helpers::{require_id, QueryParams};
use super::http::ACCEPT_ANY;
use super::AtlasCommandClient;

impl ListObjects {
    pub(crate) fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .opt("content_type", self.content_type.as_deref())
            .opt("limit", self.limit)
            .opt("offset", self.offset)
    }
}

fn require_reference(reference: &ObjectReference) -> AtlasResult<()> {
    if reference.is_empty() {
        return Err(AtlasError::InvalidRequest {
            message: "object reference needs an entity_id or a task_id".to_string(),
        });
    }
    Ok(())
}

/// Build the multipart body for `POST /objects/upload`.
fn upload_form(upload: UploadObject) -> AtlasResult<MultipartForm> {
    let mut form = MultipartForm::new().text("object_id", upload.object_id);

    if let Some(hint) = upload.usage_hint {
        form = form.text("usage_hint", hint);
    }

    if !upload.referenced_by.is_empty() {
        upload.referenced_by.iter().try_for_each(require_reference)?;
        form = form.text(
            "referenced_by",
            serde_json::to_string(&upload.referenced_by)?,
        );
    }

    Ok(form.file(
        "file",
        upload.file_name,
        upload.content_type,
        upload.data,
    ))
}

impl AtlasCommandClient {
    /// `POST /objects/upload` (multipart)
    pub async fn upload_object(&self, upload: UploadObject) -> AtlasResult<StoredObject> {
        require_id("object_id", &upload.object_id)?;
        debug!(
            object_id = %upload.object_id,
            size = upload.data.len(),
            content_type = %upload.content_type,
            "uploading object"
        );

        let form = upload_form(upload)?;
        self.call(
            Method::POST,
            &["objects", "upload"],
            QueryParams::new(),
            RequestBody::Multipart(form),
        )
        .await
    }

    /// `GET /objects`
    pub async fn list_objects(&self, filter: &ListObjects) -> AtlasResult<Vec<StoredObject>> {
        self.call(
            Method::GET,
            &["objects"],
            filter.to_query(),
            RequestBody::Empty,
        )
        .await
    }

    /// `GET /objects/{object_id}`
    pub async fn get_object(&self, object_id: &str) -> AtlasResult<StoredObject> {
        let object_id = require_id("object_id", object_id)?;
        self.call(
            Method::GET,
            &["objects", object_id],
            QueryParams::new(),
            RequestBody::Empty,
        )
        .await
    }

    /// `GET /objects/{object_id}/download`
    pub async fn download_object(&self, object_id: &str) -> AtlasResult<ObjectDownload> {
        let object_id = require_id("object_id", object_id)?;
        debug!(object_id = %object_id, "downloading object");

        let response = self
            .http
            .request_with_accept(
                Method::GET,
                &["objects", object_id, "download"],
                &QueryParams::new(),
                RequestBody::Empty,
                ACCEPT_ANY,
            )
            .await?;

        Ok(ObjectDownload {
            content_type: response.header("content-type").map(String::from),
            data: response.body,
        })
    }

    /// `PATCH /objects/{object_id}`
    pub async fn update_object(
        &self,
        object_id: &str,
        update: &ObjectUpdate,
    ) -> AtlasResult<StoredObject> {
        let object_id = require_id("object_id", object_id)?;
        if let Some(references) = &update.referenced_by {
            references.iter().try_for_each(require_reference)?;
        }
        let body = serde_json::to_value(update)?;

        self.call(
            Method::PATCH,
            &["objects", object_id],
            QueryParams::new(),
            RequestBody::Json(body),
        )
        .await
    }

    /// `DELETE /objects/{object_id}`
    pub async fn delete_object(&self, object_id: &str) -> AtlasResult<()> {
        let object_id = require_id("object_id", object_id)?;
        debug!(object_id = %object_id, "deleting object");
        self.call_unit(
            Method::DELETE,
            &["objects", object_id],
            QueryParams::new(),
            RequestBody::Empty,
        )
        .await
    }

    /// `GET /entities/{entity_id}/objects`
    pub async fn get_objects_by_entity(
        &self,
        entity_id: &str,
        filter: &ListObjects,
    ) -> AtlasResult<Vec<StoredObject>> {
        let entity_id = require_id("entity_id", entity_id)?;
        self.call(
            Method::GET,
            &["entities", entity_id, "objects"],
            filter.to_query(),
            RequestBody::Empty,
        )
        .await
    }

    /// `GET /tasks/{task_id}/objects`
    pub async fn get_objects_by_task(
        &self,
        task_id: &str,
        filter: &ListObjects,
    ) -> AtlasResult<Vec<StoredObject>> {
        let task_id = require_id("task_id", task_id)?;
        self.call(
            Method::GET,
            &["tasks", task_id, "objects"],
            filter.to_query(),
            RequestBody::Empty,
        )
        .await
    }

    /// `POST /objects/{object_id}/references`
    pub async fn add_object_reference(
        &self,
        object_id: &str,
        reference: &ObjectReference,
    ) -> AtlasResult<StoredObject> {
        let object_id = require_id("object_id", object_id)?;
        require_reference(reference)?;
        let body = serde_json::to_value(reference)?;

        self.call(
            Method::POST,
            &["objects", object_id, "references"],
            QueryParams::new(),
            RequestBody::Json(body),
        )
        .await
    }

    /// `DELETE /objects/{object_id}/references?entity_id&task_id`
    pub async fn remove_object_reference(
        &self,
        object_id: &str,
        reference: &ObjectReference,
    ) -> AtlasResult<()> {
        let object_id = require_id("object_id", object_id)?;
        require_reference(reference)?;
        let query = QueryParams::new()
            .opt("entity_id", reference.entity_id.as_deref())
            .opt("task_id", reference.task_id.as_deref());

        self.call_unit(
            Method::DELETE,
            &["objects", object_id, "references"],
            query,
            RequestBody::Empty,
        )
        .await
    }

    /// `GET /objects/{object_id}/references`
    pub async fn get_object_references(
        &self,
        object_id: &str,
    ) -> AtlasResult<Vec<ObjectReference>> {
        let object_id = require_id("object_id", object_id)?;
        self.call(
            Method::GET,
            &["objects", object_id, "references"],
            QueryParams::new(),
            RequestBody::Empty,
        )
        .await
    }

    /// `GET /objects/orphaned`
    pub async fn find_orphaned_objects(
        &self,
        filter: &ListObjects,
    ) -> AtlasResult<Vec<StoredObject>> {
        self.call(
            Method::GET,
            &["objects", "orphaned"],
            filter.to_query(),
            RequestBody::Empty,
        )
        .await
    }
}
