/// Core canvas type definitions
///
/// Defines the persisted entities (projects and their objects) and the
/// explicit schemas for incoming write payloads. Persisted rows are returned
/// to clients verbatim, column for column.

use serde::{Deserialize, Serialize};

/// A named container owning an ordered-by-creation set of canvas objects
///
/// Rows are created by the `create_project` action and only ever touched
/// again to bump `updated_at` when their objects are saved.
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    /// Store-generated project identifier
    pub id: i64,
    /// Human-readable project name
    pub name: String,
    /// Project description (may be empty)
    pub description: String,
    /// Store-maintained creation timestamp
    pub created_at: String,
    /// Store-maintained timestamp, bumped on every object save
    pub updated_at: String,
}

/// A single positioned visual element belonging to one project
///
/// `object_id` is the caller-supplied identifier, unique within a project
/// by the full-replace save discipline; `id` is the store row id and only
/// exists to keep insertion order stable.
#[derive(Debug, Clone, Serialize)]
pub struct CanvasObject {
    /// Store row id
    pub id: i64,
    /// Owning project
    pub project_id: i64,
    /// Caller-supplied identifier, unique within the project
    pub object_id: String,
    /// Shape kind (e.g., "rect", "text")
    #[serde(rename = "type")]
    pub object_type: String,
    pub x: f64,
    pub y: f64,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub text: Option<String>,
    pub color: String,
    /// Store-maintained insertion timestamp, used only for read ordering
    pub created_at: String,
}

fn default_project_name() -> String {
    "Untitled Project".to_string()
}

/// Write actions accepted on POST
///
/// Dispatched on the `action` field of the JSON body. A missing or unknown
/// action fails deserialization and surfaces as a structured 400 at the
/// handler boundary rather than an opaque runtime failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action")]
pub enum CanvasAction {
    /// Create a new project row
    /// Body: { "action": "create_project", "name": "...", "description": "..." }
    #[serde(rename = "create_project")]
    CreateProject {
        #[serde(default = "default_project_name")]
        name: String,
        #[serde(default)]
        description: String,
    },

    /// Replace the full object set of a project
    /// Body: { "action": "save_objects", "project_id": 1, "objects": [...] }
    #[serde(rename = "save_objects")]
    SaveObjects {
        project_id: i64,
        #[serde(default)]
        objects: Vec<ObjectPayload>,
    },
}

/// Incoming object payload for `save_objects`
///
/// `id`, `type`, `x`, `y`, and `color` are required; geometry extents and
/// text are optional and persist as NULL when absent.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectPayload {
    /// Becomes `object_id` in the store
    pub id: String,
    #[serde(rename = "type")]
    pub object_type: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub text: Option<String>,
    pub color: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_project_action_applies_defaults() {
        let action: CanvasAction =
            serde_json::from_value(json!({ "action": "create_project" })).unwrap();
        match action {
            CanvasAction::CreateProject { name, description } => {
                assert_eq!(name, "Untitled Project");
                assert_eq!(description, "");
            }
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[test]
    fn save_objects_action_defaults_to_empty_list() {
        let action: CanvasAction =
            serde_json::from_value(json!({ "action": "save_objects", "project_id": 7 })).unwrap();
        match action {
            CanvasAction::SaveObjects { project_id, objects } => {
                assert_eq!(project_id, 7);
                assert!(objects.is_empty());
            }
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[test]
    fn unknown_action_is_rejected() {
        let result: Result<CanvasAction, _> =
            serde_json::from_value(json!({ "action": "drop_everything" }));
        assert!(result.is_err());
    }

    #[test]
    fn object_payload_requires_color() {
        let result: Result<ObjectPayload, _> =
            serde_json::from_value(json!({ "id": "o1", "type": "rect", "x": 1.0, "y": 2.0 }));
        assert!(result.is_err());
    }

    #[test]
    fn object_payload_accepts_integer_coordinates() {
        let payload: ObjectPayload = serde_json::from_value(json!({
            "id": "o1", "type": "rect", "x": 10, "y": 20, "color": "#fff"
        }))
        .unwrap();
        assert_eq!(payload.x, 10.0);
        assert_eq!(payload.y, 20.0);
        assert!(payload.width.is_none());
        assert!(payload.text.is_none());
    }
}
