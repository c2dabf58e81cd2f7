pub mod task_service;

pub use task_service::{
    request_create, request_delete, request_load, request_update, TaskError,
    TaskServiceMessage, TaskServiceSender, UpdateKind,
};
