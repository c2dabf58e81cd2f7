//! Parsing of terminal input lines into commands.

use tasklist_services::TaskId;

pub const HELP: &str = "\
Commands:
  add [-i] <title>        add a task (-i marks it important)
  done <id>               mark a task completed
  undo <id>               mark a task pending again
  edit <id>               start editing a task
  title <id> <text>       change the title of a task being edited
  important <id> on|off   change importance of a task being edited
  save <id>               finish editing
  delete <id>             delete a task (asks first)
  filter important        toggle showing important tasks only
  filter pending          toggle showing pending tasks only
  reload                  fetch the list again
  list                    show the list
  help                    show this help
  quit                    exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add { title: String, important: bool },
    Complete(TaskId),
    Uncomplete(TaskId),
    Edit(TaskId),
    Title(TaskId, String),
    Important(TaskId, bool),
    Save(TaskId),
    Delete(TaskId),
    ToggleImportantOnly,
    TogglePendingOnly,
    Reload,
    List,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Empty,
    Unknown(String),
    Usage(&'static str),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::Empty => write!(f, "Type a command, or `help`"),
            CommandError::Unknown(word) => write!(f, "Unknown command `{}`; try `help`", word),
            CommandError::Usage(usage) => write!(f, "Usage: {}", usage),
        }
    }
}

impl std::error::Error for CommandError {}

/// Split off the first whitespace-delimited word.
fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(pos) => (&input[..pos], input[pos..].trim_start()),
        None => (input, ""),
    }
}

fn parse_id<'a>(rest: &'a str, usage: &'static str) -> Result<(TaskId, &'a str), CommandError> {
    let (id, rest) = split_word(rest);
    if id.is_empty() {
        return Err(CommandError::Usage(usage));
    }
    Ok((TaskId::from(id), rest))
}

fn single_id(rest: &str, usage: &'static str) -> Result<TaskId, CommandError> {
    let (id, extra) = parse_id(rest, usage)?;
    if !extra.is_empty() {
        return Err(CommandError::Usage(usage));
    }
    Ok(id)
}

fn parse_flag(word: &str) -> Option<bool> {
    match word.to_ascii_lowercase().as_str() {
        "on" | "yes" | "true" => Some(true),
        "off" | "no" | "false" => Some(false),
        _ => None,
    }
}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let (word, rest) = split_word(line.trim());

    match word.to_ascii_lowercase().as_str() {
        "" => Err(CommandError::Empty),
        "add" => {
            let (flag, title) = split_word(rest);
            let command = if flag == "-i" || flag == "--important" {
                Command::Add {
                    title: title.to_string(),
                    important: true,
                }
            } else {
                Command::Add {
                    title: rest.to_string(),
                    important: false,
                }
            };
            Ok(command)
        }
        "done" => single_id(rest, "done <id>").map(Command::Complete),
        "undo" => single_id(rest, "undo <id>").map(Command::Uncomplete),
        "edit" => single_id(rest, "edit <id>").map(Command::Edit),
        "save" => single_id(rest, "save <id>").map(Command::Save),
        "delete" | "rm" => single_id(rest, "delete <id>").map(Command::Delete),
        "title" => {
            let (id, text) = parse_id(rest, "title <id> <text>")?;
            Ok(Command::Title(id, text.to_string()))
        }
        "important" => {
            const USAGE: &str = "important <id> on|off";
            let (id, flag) = parse_id(rest, USAGE)?;
            parse_flag(flag.trim())
                .map(|important| Command::Important(id, important))
                .ok_or(CommandError::Usage(USAGE))
        }
        "filter" => match rest.trim().to_ascii_lowercase().as_str() {
            "important" => Ok(Command::ToggleImportantOnly),
            "pending" => Ok(Command::TogglePendingOnly),
            _ => Err(CommandError::Usage("filter important|pending")),
        },
        "reload" => Ok(Command::Reload),
        "list" | "ls" => Ok(Command::List),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        _ => Err(CommandError::Unknown(word.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_with_and_without_flag() {
        assert_eq!(
            parse_command("add Buy milk").unwrap(),
            Command::Add {
                title: "Buy milk".into(),
                important: false
            }
        );
        assert_eq!(
            parse_command("add -i  Pay rent ").unwrap(),
            Command::Add {
                title: "Pay rent".into(),
                important: true
            }
        );
    }

    #[test]
    fn blank_add_is_left_for_the_model_to_reject() {
        assert_eq!(
            parse_command("add").unwrap(),
            Command::Add {
                title: String::new(),
                important: false
            }
        );
    }

    #[test]
    fn parses_id_commands() {
        assert_eq!(parse_command("done 3").unwrap(), Command::Complete(TaskId::from(3)));
        assert_eq!(parse_command("undo a1").unwrap(), Command::Uncomplete(TaskId::from("a1")));
        assert_eq!(parse_command("DELETE 7").unwrap(), Command::Delete(TaskId::from(7)));
        assert_eq!(
            parse_command("title 2 New name here").unwrap(),
            Command::Title(TaskId::from(2), "New name here".into())
        );
        assert_eq!(
            parse_command("important 2 off").unwrap(),
            Command::Important(TaskId::from(2), false)
        );
    }

    #[test]
    fn reports_usage_errors() {
        assert_eq!(parse_command("done"), Err(CommandError::Usage("done <id>")));
        assert_eq!(parse_command("done 1 2"), Err(CommandError::Usage("done <id>")));
        assert!(matches!(parse_command("important 2 maybe"), Err(CommandError::Usage(_))));
        assert!(matches!(parse_command("filter everything"), Err(CommandError::Usage(_))));
        assert_eq!(parse_command("   "), Err(CommandError::Empty));
        assert_eq!(
            parse_command("frobnicate 1"),
            Err(CommandError::Unknown("frobnicate".into()))
        );
    }

    #[test]
    fn parses_filters_and_misc() {
        assert_eq!(parse_command("filter important").unwrap(), Command::ToggleImportantOnly);
        assert_eq!(parse_command("filter Pending").unwrap(), Command::TogglePendingOnly);
        assert_eq!(parse_command("q").unwrap(), Command::Quit);
        assert_eq!(parse_command("ls").unwrap(), Command::List);
    }
}
