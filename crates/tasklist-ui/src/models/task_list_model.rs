//! Task list controller.
//!
//! `TaskListModel` owns the local mirror of the store's tasks, the two filter
//! toggles, the add-task draft and the current notices. Every mutation goes
//! through a named operation: the operation spawns a store request, and the
//! mirror only changes when the request's result message is applied.

use std::sync::Arc;

use tasklist_core::AppError;
use tasklist_services::{NewTask, Task, TaskId, TaskPatch, TaskStore};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::confirm::ConfirmPrompt;
use crate::models::notices::Notices;
use crate::models::task_filter::TaskFilter;
use crate::services::{self, TaskError, TaskServiceMessage, TaskServiceSender, UpdateKind};

pub const EMPTY_TITLE_ERROR: &str = "Please fill in the task field.";
pub const TASK_ADDED: &str = "Task added successfully!";
pub const TASK_UPDATED: &str = "Task updated successfully!";
pub const TASK_COMPLETED: &str = "Task marked as completed!";
pub const TASK_UNCOMPLETED: &str = "Task unmarked as completed!";
pub const TASK_DELETED: &str = "Task deleted successfully!";
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this task?";

/// Contents of the add-task form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub important: bool,
}

pub struct TaskListModel {
    tasks: Vec<Task>,
    notices: Notices,
    filter: TaskFilter,
    draft: TaskDraft,
    report_failures: bool,
    in_flight: usize,
    store: Arc<dyn TaskStore>,
    runtime: Handle,
    tx: TaskServiceSender,
    rx: UnboundedReceiver<TaskServiceMessage>,
}

impl TaskListModel {
    pub fn new(store: Arc<dyn TaskStore>, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tasks: Vec::new(),
            notices: Notices::default(),
            filter: TaskFilter::default(),
            draft: TaskDraft::default(),
            report_failures: false,
            in_flight: 0,
            store,
            runtime,
            tx,
            rx,
        }
    }

    /// Show a generic error notice when a store request fails, instead of
    /// only logging it.
    pub fn with_failure_notices(mut self, report: bool) -> Self {
        self.report_failures = report;
        self
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    pub fn error_message(&self) -> Option<&str> {
        self.notices.error()
    }

    pub fn success_message(&self) -> Option<&str> {
        self.notices.success()
    }

    pub fn filter(&self) -> TaskFilter {
        self.filter
    }

    /// Tasks that pass the current filter, in mirror order.
    pub fn filtered_tasks(&self) -> Vec<&Task> {
        self.filter.apply(&self.tasks)
    }

    pub fn toggle_show_important_only(&mut self) {
        self.filter.important_only = !self.filter.important_only;
    }

    pub fn toggle_show_pending_only(&mut self) {
        self.filter.pending_only = !self.filter.pending_only;
    }

    pub fn draft(&self) -> &TaskDraft {
        &self.draft
    }

    pub fn set_draft_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_draft_important(&mut self, important: bool) {
        self.draft.important = important;
    }

    /// Number of store requests whose result hasn't been applied yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Replace the mirror with the store's full task list.
    pub fn fetch_tasks(&mut self) {
        tracing::debug!("Fetching tasks");
        self.in_flight += 1;
        services::request_load(&self.runtime, &self.tx, self.store.clone());
    }

    /// Create a task. Returns false when the title is blank; nothing is sent
    /// in that case and the error notice is set.
    pub fn add_task(&mut self, title: &str, important: bool) -> bool {
        if title.trim().is_empty() {
            self.notices.set_error(EMPTY_TITLE_ERROR);
            return false;
        }

        self.notices.clear_error();
        self.in_flight += 1;
        services::request_create(
            &self.runtime,
            &self.tx,
            self.store.clone(),
            NewTask {
                title: title.to_string(),
                important,
            },
        );
        true
    }

    /// Submit the draft form; the draft title is cleared when accepted.
    pub fn submit_draft(&mut self) -> bool {
        let title = self.draft.title.clone();
        let accepted = self.add_task(&title, self.draft.important);
        if accepted {
            self.draft.title.clear();
        }
        accepted
    }

    /// Send `patch` for `id`, then merge the same fields locally.
    /// An empty patch changes nothing and is not sent.
    pub fn update_task(&mut self, id: &TaskId, patch: TaskPatch) {
        if patch.is_empty() {
            tracing::debug!("Skipping empty update for task {}", id);
            return;
        }
        self.send_update(id, UpdateKind::Edit, patch.clone(), patch);
    }

    /// Enter edit mode.
    pub fn begin_edit(&mut self, id: &TaskId) {
        let Some(task) = self.task(id) else {
            tracing::warn!("Cannot edit unknown task {}", id);
            return;
        };
        let patch = TaskPatch {
            is_editing: Some(true),
            title: Some(task.title.clone()),
            important: Some(task.important),
            completed: Some(task.completed),
        };
        self.update_task(id, patch);
    }

    /// Change the title while editing.
    pub fn edit_title(&mut self, id: &TaskId, title: &str) {
        let Some(task) = self.task(id) else {
            tracing::warn!("Cannot retitle unknown task {}", id);
            return;
        };
        let patch = TaskPatch {
            title: Some(title.to_string()),
            important: Some(task.important),
            completed: Some(task.completed),
            is_editing: Some(true),
        };
        self.update_task(id, patch);
    }

    /// Change importance while editing.
    pub fn edit_important(&mut self, id: &TaskId, important: bool) {
        let Some(task) = self.task(id) else {
            tracing::warn!("Cannot change importance of unknown task {}", id);
            return;
        };
        let patch = TaskPatch {
            title: Some(task.title.clone()),
            important: Some(important),
            completed: Some(task.completed),
            is_editing: Some(true),
        };
        self.update_task(id, patch);
    }

    /// Leave edit mode.
    pub fn finish_edit(&mut self, id: &TaskId) {
        let Some(task) = self.task(id) else {
            tracing::warn!("Cannot save unknown task {}", id);
            return;
        };
        let patch = TaskPatch {
            is_editing: Some(false),
            important: Some(task.important),
            completed: Some(task.completed),
            ..Default::default()
        };
        self.update_task(id, patch);
    }

    pub fn mark_completed(&mut self, id: &TaskId) {
        self.set_completed(id, true);
    }

    pub fn unmark_completed(&mut self, id: &TaskId) {
        self.set_completed(id, false);
    }

    fn set_completed(&mut self, id: &TaskId, completed: bool) {
        let Some(task) = self.task(id) else {
            tracing::warn!("Cannot change completion of unknown task {}", id);
            return;
        };
        let remote = TaskPatch {
            completed: Some(completed),
            title: Some(task.title.clone()),
            ..Default::default()
        };
        let merge = TaskPatch {
            completed: Some(completed),
            ..Default::default()
        };
        let kind = if completed {
            UpdateKind::Complete
        } else {
            UpdateKind::Uncomplete
        };
        self.send_update(id, kind, remote, merge);
    }

    fn send_update(&mut self, id: &TaskId, kind: UpdateKind, remote: TaskPatch, merge: TaskPatch) {
        tracing::debug!("Updating task {} ({:?})", id, kind);
        self.in_flight += 1;
        services::request_update(
            &self.runtime,
            &self.tx,
            self.store.clone(),
            id.clone(),
            kind,
            remote,
            merge,
        );
    }

    /// Delete `id` after the user confirms. Returns whether a request was sent.
    pub async fn delete_task(&mut self, id: &TaskId, prompt: &mut dyn ConfirmPrompt) -> bool {
        if !prompt.confirm(DELETE_CONFIRMATION).await {
            tracing::debug!("Deletion of task {} declined", id);
            return false;
        }

        self.in_flight += 1;
        services::request_delete(&self.runtime, &self.tx, self.store.clone(), id.clone());
        true
    }

    /// Reconcile the mirror and notices with one request result.
    pub fn apply_message(&mut self, message: TaskServiceMessage) {
        self.in_flight = self.in_flight.saturating_sub(1);

        match message {
            TaskServiceMessage::LoadDone(Ok(tasks)) => {
                tracing::info!("Loaded {} tasks", tasks.len());
                self.tasks = tasks;
            }
            TaskServiceMessage::LoadDone(Err(e)) => self.report_failure("load tasks", e),

            TaskServiceMessage::CreateDone(Ok(task)) => {
                tracing::info!("Created task {}", task.id);
                self.tasks.push(task);
                self.notices.clear_error();
                self.notices.set_success(TASK_ADDED);
            }
            TaskServiceMessage::CreateDone(Err(e)) => self.report_failure("create task", e),

            TaskServiceMessage::UpdateDone {
                id,
                kind,
                merge,
                result: Ok(()),
            } => {
                match self.tasks.iter_mut().find(|task| task.id == id) {
                    Some(task) => task.merge(&merge),
                    None => tracing::debug!("Task {} left the mirror before its update landed", id),
                }
                tracing::info!("Updated task {} ({:?})", id, kind);
                self.notices.set_success(match kind {
                    UpdateKind::Edit => TASK_UPDATED,
                    UpdateKind::Complete => TASK_COMPLETED,
                    UpdateKind::Uncomplete => TASK_UNCOMPLETED,
                });
            }
            TaskServiceMessage::UpdateDone {
                id,
                result: Err(e),
                ..
            } => self.report_failure(&format!("update task {}", id), e),

            TaskServiceMessage::DeleteDone { id, result: Ok(()) } => {
                self.tasks.retain(|task| task.id != id);
                tracing::info!("Deleted task {}", id);
                self.notices.set_success(TASK_DELETED);
            }
            TaskServiceMessage::DeleteDone { id, result: Err(e) } => {
                self.report_failure(&format!("delete task {}", id), e)
            }
        }
    }

    fn report_failure(&mut self, action: &str, error: TaskError) {
        tracing::error!("Failed to {}: {}", action, error);
        if self.report_failures {
            let app_error = AppError::from(error);
            self.notices.set_error(app_error.user_message());
        }
    }

    /// Apply every result that has already arrived. Returns how many were applied.
    pub fn process_messages(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(message) = self.rx.try_recv() {
            self.apply_message(message);
            applied += 1;
        }
        applied
    }

    /// Wait for the next result and apply it. Returns false without waiting
    /// when nothing is in flight.
    pub async fn next_message(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }
        match self.rx.recv().await {
            Some(message) => {
                self.apply_message(message);
                true
            }
            None => false,
        }
    }

    /// Wait until every in-flight request has been applied.
    pub async fn settle(&mut self) {
        while self.next_message().await {}
    }
}
