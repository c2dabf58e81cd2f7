//! Plain-text rendering of the task list view.

use std::fmt::Write;

use tasklist_services::Task;

use crate::models::TaskListModel;

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

fn render_row(out: &mut String, task: &Task) {
    let check = if task.completed { "[x]" } else { "[ ]" };
    let kind = if task.important {
        "(Important)"
    } else {
        "(Everyday)"
    };
    let _ = write!(out, "  {} {:>4}  {} {}", check, task.id, task.title, kind);
    if task.is_editing {
        out.push_str("  <editing>");
    }
    out.push('\n');
}

/// Heading, notices, filter state and the filtered rows.
pub fn render_view(model: &TaskListModel) -> String {
    let mut out = String::new();
    out.push_str("To-Do List\n==========\n");

    if let Some(error) = model.error_message() {
        let _ = writeln!(out, "! {}", error);
    }
    if let Some(success) = model.success_message() {
        let _ = writeln!(out, "* {}", success);
    }

    let filter = model.filter();
    let _ = writeln!(
        out,
        "Filters: important only [{}], pending only [{}]",
        on_off(filter.important_only),
        on_off(filter.pending_only)
    );

    let visible = model.filtered_tasks();
    if visible.is_empty() {
        out.push_str("  (no tasks)\n");
    }
    for task in visible {
        render_row(&mut out, task);
    }

    if model.is_loading() {
        out.push_str("  ...\n");
    }

    out
}
