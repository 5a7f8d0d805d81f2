//! Typed entity and task components.
//!
//! Every known component has a struct here. Keys outside the known set land
//! in the flattened `custom` map; they are checked against the `custom_`
//! prefix when a request is built, not when the struct is constructed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Components attached to an entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityComponents {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telemetry: Option<Telemetry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Geometry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_catalog: Option<TaskCatalog>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_refs: Option<Vec<MediaRef>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mil_view: Option<MilView>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<Health>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensor_refs: Option<Vec<SensorRef>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub communications: Option<Communications>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_queue: Option<TaskQueue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EntityStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heartbeat: Option<Heartbeat>,

    /// Custom components (keys must start with `custom_`).
    #[serde(flatten)]
    pub custom: Map<String, Value>,
}

impl EntityComponents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_telemetry(mut self, telemetry: Telemetry) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn with_task_catalog(mut self, task_catalog: TaskCatalog) -> Self {
        self.task_catalog = Some(task_catalog);
        self
    }

    pub fn with_media_refs(mut self, media_refs: Vec<MediaRef>) -> Self {
        self.media_refs = Some(media_refs);
        self
    }

    pub fn with_mil_view(mut self, mil_view: MilView) -> Self {
        self.mil_view = Some(mil_view);
        self
    }

    pub fn with_health(mut self, health: Health) -> Self {
        self.health = Some(health);
        self
    }

    pub fn with_sensor_refs(mut self, sensor_refs: Vec<SensorRef>) -> Self {
        self.sensor_refs = Some(sensor_refs);
        self
    }

    pub fn with_communications(mut self, communications: Communications) -> Self {
        self.communications = Some(communications);
        self
    }

    pub fn with_task_queue(mut self, task_queue: TaskQueue) -> Self {
        self.task_queue = Some(task_queue);
        self
    }

    pub fn with_status(mut self, status: EntityStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_heartbeat(mut self, heartbeat: Heartbeat) -> Self {
        self.heartbeat = Some(heartbeat);
        self
    }

    /// Attach a custom component. `key` is stored as given.
    pub fn with_custom(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.custom.insert(key.into(), value.into());
        self
    }
}

/// Position and motion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Telemetry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude_m: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_m_s: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_deg: Option<f64>,
}

impl Telemetry {
    pub fn position(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
            ..Default::default()
        }
    }
}

/// One vertex as `[longitude, latitude]`. Either ordinate may be missing;
/// missing vertices keep their slot so indices stay stable.
pub type Vertex = [Option<f64>; 2];

/// Spatial footprint.
///
/// Shapes written by this crate carry an explicit snake_case `type` tag.
/// Anything else, such as a plain GeoJSON geometry
/// (`{"type": "Polygon", "coordinates": [[[..]]]}`), is read into
/// [`Geometry::GeoJson`] and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Geometry {
    Point {
        latitude: f64,
        longitude: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        altitude_m: Option<f64>,
    },
    Circle {
        latitude: f64,
        longitude: f64,
        radius_m: f64,
    },
    Polygon { coordinates: Vec<Vertex> },
    LineString { coordinates: Vec<Vertex> },
    /// Legacy GeoJSON geometry, passed through untouched.
    #[serde(untagged)]
    GeoJson(Value),
}

impl Geometry {
    pub fn polygon(vertices: impl IntoIterator<Item = [f64; 2]>) -> Self {
        Self::Polygon {
            coordinates: vertices.into_iter().map(|[x, y]| [Some(x), Some(y)]).collect(),
        }
    }

    pub fn line_string(vertices: impl IntoIterator<Item = [f64; 2]>) -> Self {
        Self::LineString {
            coordinates: vertices.into_iter().map(|[x, y]| [Some(x), Some(y)]).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskCatalog {
    #[serde(default)]
    pub supported_tasks: Vec<String>,
}

/// Reference to a stored object (image, video, document).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRef {
    pub object_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Military symbology view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MilView {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Health {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_percent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorRef {
    pub sensor_id: String,

    #[serde(rename = "type")]
    pub sensor_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical_fov: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal_fov: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Communications {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_state: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskQueue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_task_id: Option<String>,

    #[serde(default)]
    pub queued_task_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityStatus {
    pub value: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<DateTime<Utc>>,
}

impl EntityStatus {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            last_update: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Heartbeat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<DateTime<Utc>>,
}

/// Components attached to a task. Keys are not restricted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskComponents {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<TaskProgress>,

    #[serde(flatten)]
    pub custom: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskProgress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_geometry_tag_is_explicit() {
        let point = Geometry::Point {
            latitude: 40.0,
            longitude: -74.0,
            altitude_m: None,
        };
        assert_eq!(
            serde_json::to_value(&point).unwrap(),
            json!({ "type": "point", "latitude": 40.0, "longitude": -74.0 })
        );

        let line = Geometry::line_string([[0.0, 0.0], [1.0, 1.0]]);
        assert_eq!(serde_json::to_value(&line).unwrap()["type"], "line_string");
    }

    #[test]
    fn test_polygon_keeps_missing_vertex() {
        let raw = json!({
            "type": "polygon",
            "coordinates": [[1.0, 2.0], [null, null], [3.0, 4.0]]
        });
        let geometry: Geometry = serde_json::from_value(raw.clone()).unwrap();
        match &geometry {
            Geometry::Polygon { coordinates } => {
                assert_eq!(coordinates.len(), 3);
                assert_eq!(coordinates[1], [None, None]);
            }
            other => panic!("expected polygon, got {:?}", other),
        }
        assert_eq!(serde_json::to_value(&geometry).unwrap(), raw);
    }

    #[test]
    fn test_plain_geojson_is_passed_through() {
        let raw = json!({
            "type": "Polygon",
            "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]]
        });
        let geometry: Geometry = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(geometry, Geometry::GeoJson(raw.clone()));
        assert_eq!(serde_json::to_value(&geometry).unwrap(), raw);
    }

    #[test]
    fn test_geojson_inside_entity_components() {
        let components: EntityComponents = serde_json::from_value(json!({
            "geometry": { "type": "Point", "coordinates": [4.3, 52.1] },
            "health": { "battery_percent": 50.0 }
        }))
        .unwrap();

        assert!(matches!(components.geometry, Some(Geometry::GeoJson(_))));
        assert!(components.custom.is_empty());
    }

    #[test]
    fn test_builders_cover_known_components() {
        let components = EntityComponents::new()
            .with_task_catalog(TaskCatalog {
                supported_tasks: vec!["survey".to_string()],
            })
            .with_media_refs(vec![MediaRef {
                object_id: "img-1".to_string(),
                role: None,
            }])
            .with_mil_view(MilView::default())
            .with_sensor_refs(Vec::new())
            .with_communications(Communications {
                link_state: Some("up".to_string()),
            })
            .with_task_queue(TaskQueue::default())
            .with_heartbeat(Heartbeat::default());

        let value = serde_json::to_value(&components).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            [
                "task_catalog",
                "media_refs",
                "mil_view",
                "sensor_refs",
                "communications",
                "task_queue",
                "heartbeat"
            ]
        );
    }

    #[test]
    fn test_unknown_keys_land_in_custom() {
        let components: EntityComponents = serde_json::from_value(json!({
            "telemetry": { "latitude": 1.0, "longitude": 2.0 },
            "custom_weather": { "wind_speed": 12 },
        }))
        .unwrap();

        assert_eq!(components.telemetry, Some(Telemetry::position(1.0, 2.0)));
        assert_eq!(components.custom["custom_weather"], json!({ "wind_speed": 12 }));
    }

    #[test]
    fn test_serialize_skips_absent_components() {
        let components = EntityComponents::new()
            .with_health(Health {
                battery_percent: Some(80.0),
            })
            .with_custom("custom_note", "hello");

        assert_eq!(
            serde_json::to_value(&components).unwrap(),
            json!({ "health": { "battery_percent": 80.0 }, "custom_note": "hello" })
        );
    }

    #[test]
    fn test_sensor_type_wire_name() {
        let sensor = SensorRef {
            sensor_id: "cam-1".to_string(),
            sensor_type: "eo".to_string(),
            vertical_fov: None,
            horizontal_fov: Some(60.0),
        };
        let value = serde_json::to_value(&sensor).unwrap();
        assert_eq!(value["type"], "eo");
        assert!(value.get("vertical_fov").is_none());
    }
}
