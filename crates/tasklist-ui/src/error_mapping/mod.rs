//! Maps UI service errors to tasklist_core::AppError for consistent user-facing messages.

mod task;
