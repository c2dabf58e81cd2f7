//! Runs parsed commands against the model.
//!
//! Row-level rules of the list view live here, not in the model: only rows
//! that exist can be acted on, completed rows can't enter edit mode, and the
//! title/importance/save controls only exist while a row is being edited.

use tasklist_services::{Task, TaskId};

use crate::command::{Command, HELP};
use crate::confirm::ConfirmPrompt;
use crate::models::TaskListModel;

/// What the caller should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// State changed or was requested; redraw the view.
    Render,
    /// Show this text; the view is unchanged.
    Say(String),
    Quit,
}

/// Look up a row by the id the user typed. Numeric ids match regardless of
/// leading zeros; the stored id is what gets sent to the store.
fn find<'a>(model: &'a TaskListModel, id: &TaskId) -> Result<&'a Task, Outcome> {
    model
        .task(id)
        .or_else(|| model.tasks().iter().find(|t| t.id.same_number(id)))
        .ok_or_else(|| Outcome::Say(format!("No task with id {}", id)))
}

fn find_editing(model: &TaskListModel, id: &TaskId) -> Result<TaskId, Outcome> {
    let task = find(model, id)?;
    if task.is_editing {
        Ok(task.id.clone())
    } else {
        Err(Outcome::Say(format!(
            "Task {} is not being edited; use `edit {}` first",
            task.id, task.id
        )))
    }
}

pub async fn execute(
    model: &mut TaskListModel,
    command: Command,
    prompt: &mut dyn ConfirmPrompt,
) -> Outcome {
    match run(model, command, prompt).await {
        Ok(outcome) | Err(outcome) => outcome,
    }
}

async fn run(
    model: &mut TaskListModel,
    command: Command,
    prompt: &mut dyn ConfirmPrompt,
) -> Result<Outcome, Outcome> {
    match command {
        Command::Add { title, important } => {
            model.set_draft_title(title);
            model.set_draft_important(important);
            model.submit_draft();
        }
        Command::Complete(id) => {
            let task = find(model, &id)?;
            if task.completed {
                return Ok(Outcome::Say(format!("Task {} is already completed", task.id)));
            }
            let id = task.id.clone();
            model.mark_completed(&id);
        }
        Command::Uncomplete(id) => {
            let task = find(model, &id)?;
            if !task.completed {
                return Ok(Outcome::Say(format!("Task {} is not completed", task.id)));
            }
            let id = task.id.clone();
            model.unmark_completed(&id);
        }
        Command::Edit(id) => {
            let task = find(model, &id)?;
            if task.completed {
                return Ok(Outcome::Say(format!(
                    "Completed tasks can't be edited; use `undo {}` first",
                    task.id
                )));
            }
            if task.is_editing {
                return Ok(Outcome::Say(format!("Task {} is already being edited", task.id)));
            }
            let id = task.id.clone();
            model.begin_edit(&id);
        }
        Command::Title(id, title) => {
            let id = find_editing(model, &id)?;
            model.edit_title(&id, &title);
        }
        Command::Important(id, important) => {
            let id = find_editing(model, &id)?;
            model.edit_important(&id, important);
        }
        Command::Save(id) => {
            let id = find_editing(model, &id)?;
            model.finish_edit(&id);
        }
        Command::Delete(id) => {
            let id = find(model, &id)?.id.clone();
            if !model.delete_task(&id, prompt).await {
                return Ok(Outcome::Say("Kept the task".to_string()));
            }
        }
        Command::ToggleImportantOnly => model.toggle_show_important_only(),
        Command::TogglePendingOnly => model.toggle_show_pending_only(),
        Command::Reload => model.fetch_tasks(),
        Command::List => {}
        Command::Help => return Ok(Outcome::Say(HELP.to_string())),
        Command::Quit => return Ok(Outcome::Quit),
    }

    Ok(Outcome::Render)
}
