pub mod notices;
pub mod task_filter;
pub mod task_list_model;

pub use notices::Notices;
pub use task_filter::TaskFilter;
pub use task_list_model::{TaskDraft, TaskListModel};
