//! HTTP client for a REST task store exposing `/tasks`.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use url::Url;

use crate::retry::{with_retry, RetryConfig};
use crate::task::{NewTask, Task, TaskId, TaskPatch};
use crate::task_store::{TaskStore, TaskStoreError, TaskStoreResult};

const TASKS_PATH: &str = "tasks";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Task store reached over HTTP.
#[derive(Debug, Clone)]
pub struct TaskClient {
    base_url: Url,
    client: Arc<Client>,
    retry: RetryConfig,
}

impl TaskClient {
    /// Create a client with the default timeout and retry policy
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_options(base_url, DEFAULT_TIMEOUT, RetryConfig::default())
    }

    pub fn with_options(base_url: &str, timeout: Duration, retry: RetryConfig) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid task store URL: {}", base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Task store URL cannot be used as a base: {}", base_url);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url,
            client: Arc::new(client),
            retry,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `<base>/tasks`, followed by `extra` as percent-encoded segments
    fn url_with_segments(&self, extra: &[&str]) -> TaskStoreResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TaskStoreError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(TASKS_PATH)
            .extend(extra);
        Ok(url)
    }

    fn task_url(&self, id: &TaskId) -> TaskStoreResult<Url> {
        self.url_with_segments(&[id.as_str()])
    }

    async fn check_response(response: Response, id: Option<&TaskId>) -> TaskStoreResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if let (StatusCode::NOT_FOUND, Some(id)) = (status, id) {
            return Err(TaskStoreError::NotFound(id.clone()));
        }

        let error_text = response.text().await.unwrap_or_default();
        Err(TaskStoreError::api(status.as_u16(), error_text))
    }
}

#[async_trait]
impl TaskStore for TaskClient {
    async fn list_tasks(&self) -> TaskStoreResult<Vec<Task>> {
        let url = self.url_with_segments(&[])?;
        tracing::debug!("GET {}", url);

        let response = with_retry(&self.retry, || self.client.get(url.clone()).send()).await?;
        let response = Self::check_response(response, None).await?;
        let tasks: Vec<Task> = response
            .json()
            .await
            .map_err(|e| TaskStoreError::InvalidResponse(e.to_string()))?;

        tracing::debug!("Fetched {} tasks", tasks.len());
        Ok(tasks)
    }

    async fn create_task(&self, task: NewTask) -> TaskStoreResult<Task> {
        let url = self.url_with_segments(&[])?;
        tracing::debug!("POST {}", url);

        // No retry: a repeated POST could create the task twice.
        let response = self.client.post(url).json(&task).send().await?;
        let response = Self::check_response(response, None).await?;
        let created: Task = response
            .json()
            .await
            .map_err(|e| TaskStoreError::InvalidResponse(e.to_string()))?;

        Ok(created)
    }

    async fn update_task(&self, id: &TaskId, patch: TaskPatch) -> TaskStoreResult<()> {
        let url = self.task_url(id)?;
        tracing::debug!("PUT {}", url);

        let response = with_retry(&self.retry, || {
            self.client.put(url.clone()).json(&patch).send()
        })
        .await?;
        Self::check_response(response, Some(id)).await?;

        Ok(())
    }

    async fn delete_task(&self, id: &TaskId) -> TaskStoreResult<()> {
        let url = self.task_url(id)?;
        tracing::debug!("DELETE {}", url);

        let response = with_retry(&self.retry, || self.client.delete(url.clone()).send()).await?;
        Self::check_response(response, Some(id)).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tasks_url_from_bare_host() {
        let client = TaskClient::new("http://localhost:3001").unwrap();
        let url = client.url_with_segments(&[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3001/tasks");
    }

    #[test]
    fn test_tasks_url_keeps_base_path() {
        let client = TaskClient::new("http://example.com/api/").unwrap();
        let url = client.url_with_segments(&[]).unwrap();
        assert_eq!(url.as_str(), "http://example.com/api/tasks");

        let client = TaskClient::new("http://example.com/api").unwrap();
        let url = client.url_with_segments(&[]).unwrap();
        assert_eq!(url.as_str(), "http://example.com/api/tasks");
    }

    #[test]
    fn test_task_url_encodes_id() {
        let client = TaskClient::new("http://localhost:3001").unwrap();
        let url = client.task_url(&TaskId::from("a b/c")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3001/tasks/a%20b%2Fc");
    }

    #[test]
    fn test_rejects_invalid_base() {
        assert!(TaskClient::new("not a url").is_err());
        assert!(TaskClient::new("mailto:someone@example.com").is_err());
    }
}
