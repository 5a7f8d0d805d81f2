//! Request and response types for the Atlas Command API.

pub mod components;
pub mod config;
pub mod entity;
pub mod object;
pub mod query;
pub mod task;

pub use components::{
    Communications, EntityComponents, EntityStatus, Geometry, Health, Heartbeat, MediaRef,
    MilView, SensorRef, TaskCatalog, TaskComponents, TaskProgress, TaskQueue, Telemetry,
    Vertex,
};
pub use config::ClientConfig;
pub use entity::{Checkin, CheckinResponse, Entity, EntityUpdate, ListEntities, NewEntity};
pub use object::{
    ListObjects, ObjectDownload, ObjectReference, ObjectUpdate, StoredObject, UploadObject,
};
pub use query::{Dataset, FullDataset, HealthStatus};
pub use task::{ListTasks, NewTask, Task, TaskStatus, TaskUpdate};
