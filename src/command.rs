use std::str::FromStr;

use parse_display::Display;

use crate::{Filter, TodoId};


/// A user action, as typed into a line-oriented front end.
///
/// ```text
/// add <description>
/// toggle <id>
/// edit <id> <description>
/// remove <id>
/// filter <all|active|completed>
/// clear-completed
/// toggle-all
/// list
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Toggle(TodoId),
    Edit(TodoId, String),
    Remove(TodoId),
    SetFilter(Filter),
    ClearCompleted,
    ToggleAll,
    List,
}

#[derive(Clone, Debug, Display, PartialEq, Eq)]
pub enum CommandError {
    #[display("empty command")]
    Empty,
    #[display("unknown command `{0}`")]
    UnknownVerb(String),
    #[display("`{verb}` requires <{name}>")]
    MissingArgument {
        verb: &'static str,
        name: &'static str,
    },
    #[display("unknown filter `{0}`, expected all, active or completed")]
    BadFilter(String),
}

impl std::error::Error for CommandError {}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(CommandError::Empty);
        }
        let (verb, rest) = match s.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (s, ""),
        };
        match verb {
            "add" => Ok(Command::Add(rest.to_owned())),
            "toggle" => Ok(Command::Toggle(id_arg("toggle", rest)?)),
            "edit" => {
                let (id, description) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                Ok(Command::Edit(
                    id_arg("edit", id)?,
                    description.trim().to_owned(),
                ))
            }
            "remove" => Ok(Command::Remove(id_arg("remove", rest)?)),
            "filter" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument {
                        verb: "filter",
                        name: "filter",
                    });
                }
                rest.parse()
                    .map(Command::SetFilter)
                    .map_err(|_| CommandError::BadFilter(rest.to_owned()))
            }
            "clear-completed" => Ok(Command::ClearCompleted),
            "toggle-all" => Ok(Command::ToggleAll),
            "list" => Ok(Command::List),
            _ => Err(CommandError::UnknownVerb(verb.to_owned())),
        }
    }
}

fn id_arg(verb: &'static str, arg: &str) -> Result<TodoId, CommandError> {
    if arg.is_empty() {
        Err(CommandError::MissingArgument { verb, name: "id" })
    } else {
        Ok(TodoId::from(arg))
    }
}
