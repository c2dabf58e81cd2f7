//! Task records as exchanged with the remote task store.

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier assigned by the task store.
///
/// Stores hand out either numbers or strings; both are kept as their string
/// form so `1` and `"1"` name the same task. Integral floats such as `1.0`
/// are read as the integer `1`. Text ids are kept verbatim, since they go
/// back into request paths as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Both ids read as the same integer, e.g. `01` and `1`.
    pub fn same_number(&self, other: &TaskId) -> bool {
        match (self.0.parse::<i64>(), other.0.parse::<i64>()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<i64> for TaskId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Uint(u64),
            Float(f64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => TaskId(n.to_string()),
            RawId::Uint(n) => TaskId(n.to_string()),
            RawId::Float(n) if n.fract() == 0.0 && n.abs() < 9.0e15 => {
                TaskId((n as i64).to_string())
            }
            RawId::Float(n) => TaskId(n.to_string()),
            RawId::Text(s) => TaskId(s),
        })
    }
}

/// A single task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub important: bool,
    #[serde(default)]
    pub completed: bool,
    /// Client-side edit mode; only reaches the store inside update payloads.
    #[serde(default, rename = "isEditing")]
    pub is_editing: bool,
}

impl Task {
    /// Overwrite the fields present in `patch`.
    pub fn merge(&mut self, patch: &TaskPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(important) = patch.important {
            self.important = important;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(is_editing) = patch.is_editing {
            self.is_editing = is_editing;
        }
    }
}

/// Request body for creating a task.
#[derive(Debug, Clone, Serialize)]
pub struct NewTask {
    pub title: String,
    pub important: bool,
}

/// Partial update; only `Some` fields are sent and merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub important: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(rename = "isEditing", skip_serializing_if = "Option::is_none")]
    pub is_editing: Option<bool>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.important.is_none()
            && self.completed.is_none()
            && self.is_editing.is_none()
    }
}
