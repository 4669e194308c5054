use std::str::FromStr;

use thiserror::Error;

use super::models::UserId;

pub const USAGE: &str = "commands: list | new | edit <id> | name <text> | email <text> | submit | delete <id> | reload | help | quit";

/// A line typed into the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    New,
    Edit(UserId),
    Name(String),
    Email(String),
    Submit,
    Delete(UserId),
    Reload,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command {0:?}")]
    Unknown(String),
    #[error("{0} needs an argument")]
    MissingArgument(&'static str),
}

fn required_id(command: &'static str, rest: &str) -> Result<UserId, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingArgument(command));
    }
    // anything that is not a number is a text id, so this cannot fail
    Ok(rest.parse::<UserId>().unwrap_or_else(|never| match never {}))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        match word {
            "list" | "ls" => Ok(Command::List),
            "new" => Ok(Command::New),
            "edit" => Ok(Command::Edit(required_id("edit", rest)?)),
            // field text is taken verbatim, an empty value clears the field
            "name" => Ok(Command::Name(rest.to_owned())),
            "email" => Ok(Command::Email(rest.to_owned())),
            "submit" => Ok(Command::Submit),
            "delete" | "rm" => Ok(Command::Delete(required_id("delete", rest)?)),
            "reload" => Ok(Command::Reload),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_owned())),
        }
    }
}
