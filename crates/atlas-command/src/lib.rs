//! Typed client for the Atlas Command entity, task and object API.
//!
//! This crate provides:
//!
//! - Typed payloads for entities, tasks, stored objects and their components
//! - Component key validation and null stripping for request bodies
//! - An async client with bearer-token auth over a pluggable transport
//!
//! # Quick Start
//!
//! ```no_run
//! use atlas_command::{AtlasCommandClient, ClientConfig, EntityComponents, NewEntity, Telemetry};
//!
//! # async fn example() -> Result<(), atlas_command::AtlasError> {
//! let client = AtlasCommandClient::new(
//!     ClientConfig::default()
//!         .with_base_url("https://atlas.example.com")
//!         .with_token("my-token"),
//! )?;
//!
//! let components = EntityComponents::new()
//!     .with_telemetry(Telemetry::position(40.71, -74.0))
//!     .with_custom("custom_weather", serde_json::json!({ "wind_speed": 12 }));
//!
//! let entity = client
//!     .create_entity(&NewEntity::new("drone-1", "asset", "Drone 1").with_components(components))
//!     .await?;
//! println!("created {}", entity.entity_id);
//! # Ok(())
//! # }
//! ```
//!
//! # Components
//!
//! Entity component keys must be one of [`KNOWN_COMPONENTS`] or start with
//! [`CUSTOM_COMPONENT_PREFIX`]. The client checks this before sending and
//! fails with [`AtlasError::UnknownComponentKey`] without touching the
//! network. Null fields are stripped from component records; null slots in
//! arrays are kept.
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `ATLAS_COMMAND_URL` | API base URL (default: `http://localhost:8000`) |
//! | `ATLAS_COMMAND_TOKEN` | Bearer token |
//! | `ATLAS_COMMAND_TIMEOUT` | Request timeout in seconds (default: 30) |

pub mod auth;
pub mod client;
pub mod components;
pub mod error;
pub mod transport;
pub mod types;

// Re-export main types
pub use auth::TokenProvider;
pub use client::AtlasCommandClient;
pub use components::{
    components_to_record, is_known_component, is_valid_component_key, strip_nulls,
    validate_entity_components, CUSTOM_COMPONENT_PREFIX, KNOWN_COMPONENTS,
};
pub use error::{AtlasError, AtlasResult};
pub use transport::{
    FormPart, HttpRequest, HttpResponse, Method, MultipartForm, RequestBody, ReqwestTransport,
    Transport, USER_AGENT_VALUE,
};
pub use types::{
    Checkin, CheckinResponse, ClientConfig, Communications, Dataset, Entity, EntityComponents,
    EntityStatus, EntityUpdate, FullDataset, Geometry, Health, HealthStatus, Heartbeat,
    ListEntities, ListObjects, ListTasks, MediaRef, MilView, NewEntity, NewTask, ObjectDownload,
    ObjectReference, ObjectUpdate, SensorRef, StoredObject, Task, TaskCatalog, TaskComponents,
    TaskProgress, TaskQueue, TaskStatus, TaskUpdate, Telemetry, UploadObject, Vertex,
};
