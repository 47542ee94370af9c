//! Batch write payloads: the request envelope sent to the batch endpoint and
//! the task acknowledgement returned for it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::action::Action;

/// Attribute holding a record's unique identifier.
pub const OBJECT_ID_KEY: &str = "objectID";

/// A single operation inside a batch write.
///
/// Serializes as `{"action": "<wire value>", "body": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRequest {
    pub action: Action,
    pub body: Value,
}

impl BatchRequest {
    #[must_use]
    pub fn new(action: Action, body: Value) -> Self {
        Self { action, body }
    }

    /// Request for an action that targets the whole index; the body is `{}`.
    #[must_use]
    pub fn index_level(action: Action) -> Self {
        Self {
            action,
            body: Value::Object(serde_json::Map::new()),
        }
    }
}

/// Body of a batch write call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BatchWriteParams {
    pub requests: Vec<BatchRequest>,
}

impl BatchWriteParams {
    #[must_use]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

/// Acknowledgement for one batch write call.
///
/// The engine applies the batch asynchronously; `task_id` identifies the
/// indexing task and `object_ids` lists the affected records in request order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResponse {
    #[serde(rename = "taskID")]
    pub task_id: i64,
    #[serde(rename = "objectIDs", default)]
    pub object_ids: Vec<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
