pub mod retry;
pub mod task;
pub mod task_client;
pub mod task_store;

pub use retry::RetryConfig;
pub use task::{NewTask, Task, TaskId, TaskPatch};
pub use task_client::TaskClient;
pub use task_store::{TaskStore, TaskStoreError, TaskStoreResult};
