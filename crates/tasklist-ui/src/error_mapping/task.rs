use crate::services::TaskError;
use tasklist_core::{AppError, NetworkError};

impl From<TaskError> for AppError {
    fn from(e: TaskError) -> Self {
        match e {
            TaskError::Network(s) => AppError::Network(NetworkError::ConnectionFailed(s)),
            TaskError::Timeout => AppError::Network(NetworkError::Timeout),
            TaskError::Server { status, message } => {
                AppError::Network(NetworkError::ServerError { status, message })
            }
            TaskError::NotFound(id) => AppError::Network(NetworkError::NotFound(id)),
            TaskError::InvalidResponse(s) => AppError::Network(NetworkError::InvalidResponse(s)),
        }
    }
}
