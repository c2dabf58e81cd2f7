pub mod command;
pub mod confirm;
pub mod error_mapping;
pub mod models;
pub mod render;
pub mod services;
pub mod terminal;

pub use command::{parse_command, Command, CommandError};
pub use confirm::{ConfirmPrompt, FixedAnswer};
pub use models::{TaskFilter, TaskListModel};
pub use render::render_view;
pub use terminal::{execute, Outcome};
