//! Task store trait and error types.
//!
//! `TaskStore` is the boundary between the task list controller and whatever
//! owns the authoritative records. `TaskClient` implements it over HTTP; tests
//! use in-memory fakes.

use async_trait::async_trait;
use thiserror::Error;

use crate::task::{NewTask, Task, TaskId, TaskPatch};

/// Errors that can occur during task store operations.
#[derive(Debug, Error)]
pub enum TaskStoreError {
    /// The store has no task with this id.
    #[error("Task not found: {0}")]
    NotFound(TaskId),

    /// Non-success HTTP status.
    #[error("Task store error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Transport failure (connect, timeout, body).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Body could not be decoded into the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid store URL: {0}")]
    InvalidUrl(String),
}

impl TaskStoreError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// HTTP status associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound(_) => Some(404),
            Self::Api { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            Self::InvalidResponse(_) | Self::InvalidUrl(_) => None,
        }
    }
}

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Remote owner of task records: list, create, update and delete by id.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Fetch the full task collection.
    async fn list_tasks(&self) -> TaskStoreResult<Vec<Task>>;

    /// Create a task; the store assigns the id and returns the full record.
    async fn create_task(&self, task: NewTask) -> TaskStoreResult<Task>;

    /// Send a partial update. The response body is not used.
    async fn update_task(&self, id: &TaskId, patch: TaskPatch) -> TaskStoreResult<()>;

    /// Delete a task by id.
    async fn delete_task(&self, id: &TaskId) -> TaskStoreResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status() {
        assert_eq!(TaskStoreError::NotFound(TaskId::from(3)).status(), Some(404));
        assert_eq!(TaskStoreError::api(503, "down").status(), Some(503));
        assert_eq!(TaskStoreError::InvalidResponse("x".into()).status(), None);
    }

    #[test]
    fn test_error_display() {
        let err = TaskStoreError::api(500, "boom");
        assert_eq!(err.to_string(), "Task store error (500): boom");
        assert!(TaskStoreError::NotFound(TaskId::from("abc"))
            .to_string()
            .contains("abc"));
    }
}
