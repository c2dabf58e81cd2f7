//! Task service: spawns task store requests on the runtime.
//! Results come back to the owning model as messages on a channel.

use std::sync::Arc;

use tasklist_services::{NewTask, Task, TaskId, TaskPatch, TaskStore, TaskStoreError};
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;

/// Error type for task operations, cheap to clone into messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    Network(String),
    Timeout,
    Server { status: u16, message: String },
    NotFound(String),
    InvalidResponse(String),
}

impl std::fmt::Display for TaskError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskError::Network(s) => write!(f, "Network error: {}", s),
            TaskError::Timeout => write!(f, "Request timed out"),
            TaskError::Server { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
            TaskError::NotFound(id) => write!(f, "Task not found: {}", id),
            TaskError::InvalidResponse(s) => write!(f, "Invalid response: {}", s),
        }
    }
}

impl std::error::Error for TaskError {}

impl From<TaskStoreError> for TaskError {
    fn from(e: TaskStoreError) -> Self {
        match e {
            TaskStoreError::NotFound(id) => TaskError::NotFound(id.to_string()),
            TaskStoreError::Api { status, message } => TaskError::Server { status, message },
            TaskStoreError::Network(e) if e.is_timeout() => TaskError::Timeout,
            TaskStoreError::Network(e) => match e.status() {
                Some(status) => TaskError::Server {
                    status: status.as_u16(),
                    message: e.to_string(),
                },
                None => TaskError::Network(e.to_string()),
            },
            TaskStoreError::InvalidResponse(s) => TaskError::InvalidResponse(s),
            TaskStoreError::InvalidUrl(s) => TaskError::Network(format!("invalid URL {}", s)),
        }
    }
}

/// What an update was for; picks the success notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKind {
    Edit,
    Complete,
    Uncomplete,
}

/// Messages sent from async operations back to the model
#[derive(Debug)]
pub enum TaskServiceMessage {
    /// Result of fetching the full task list
    LoadDone(Result<Vec<Task>, TaskError>),
    /// Result of creating a task
    CreateDone(Result<Task, TaskError>),
    /// Result of an update. `merge` is what gets applied locally on success,
    /// which may be less than what was sent.
    UpdateDone {
        id: TaskId,
        kind: UpdateKind,
        merge: TaskPatch,
        result: Result<(), TaskError>,
    },
    /// Result of deleting a task
    DeleteDone {
        id: TaskId,
        result: Result<(), TaskError>,
    },
}

pub type TaskServiceSender = UnboundedSender<TaskServiceMessage>;

/// Request the full task list.
/// Sends `LoadDone` on the channel when complete.
pub fn request_load(runtime: &Handle, tx: &TaskServiceSender, store: Arc<dyn TaskStore>) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = store.list_tasks().await.map_err(TaskError::from);
        let _ = tx.send(TaskServiceMessage::LoadDone(result));
    });
}

/// Request creation of a task.
/// Sends `CreateDone` on the channel when complete.
pub fn request_create(
    runtime: &Handle,
    tx: &TaskServiceSender,
    store: Arc<dyn TaskStore>,
    task: NewTask,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = store.create_task(task).await.map_err(TaskError::from);
        let _ = tx.send(TaskServiceMessage::CreateDone(result));
    });
}

/// Send `remote` as a partial update for `id`.
/// Sends `UpdateDone` carrying `merge` when complete.
pub fn request_update(
    runtime: &Handle,
    tx: &TaskServiceSender,
    store: Arc<dyn TaskStore>,
    id: TaskId,
    kind: UpdateKind,
    remote: TaskPatch,
    merge: TaskPatch,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = store
            .update_task(&id, remote)
            .await
            .map_err(TaskError::from);
        let _ = tx.send(TaskServiceMessage::UpdateDone {
            id,
            kind,
            merge,
            result,
        });
    });
}

/// Request deletion of a task.
/// Sends `DeleteDone` on the channel when complete.
pub fn request_delete(
    runtime: &Handle,
    tx: &TaskServiceSender,
    store: Arc<dyn TaskStore>,
    id: TaskId,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = store.delete_task(&id).await.map_err(TaskError::from);
        let _ = tx.send(TaskServiceMessage::DeleteDone { id, result });
    });
}
