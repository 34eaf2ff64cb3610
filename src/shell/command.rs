//! Command definitions
//!
//! Parses one input line into a store command.

use crate::error::{Result, StackError};

pub const USAGE_SET: &str = "Usage: SET <key> <value> - Stores the value for the given key.";
pub const USAGE_GET: &str = "Usage: GET <key> - Returns the current value for the given key.";
pub const USAGE_DELETE: &str = "Usage: DELETE <key> - Removes the entry for the given key.";
pub const USAGE_COUNT: &str =
    "Usage: COUNT <value> - Returns the number of keys that have the given value.";
pub const USAGE_COMMIT: &str = "Usage: COMMIT - Completes the current transaction.";
pub const USAGE_ROLLBACK: &str = "Usage: ROLLBACK - Reverts to state prior to BEGIN call.";

pub const HELP: &str = "\
Unknown command. Available commands are:
- SET <key> <value>: Stores the value for the given key.
- GET <key>: Returns the current value for the given key.
- DELETE <key>: Removes the entry for the given key.
- COUNT <value>: Returns the number of keys that have the given value.
- BEGIN: Starts a new transaction.
- COMMIT: Completes the current transaction.
- ROLLBACK: Reverts to state prior to BEGIN call.
- EXIT: Exits the application.";

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Set,
    Get,
    Delete,
    Count,
    Begin,
    Commit,
    Rollback,
    Exit,
}

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Store a value. The value may contain spaces.
    Set { key: String, value: String },

    /// Read a value
    Get { key: String },

    /// Remove a key
    Delete { key: String },

    /// Count keys holding a value
    Count { value: String },

    Begin,
    Commit,
    Rollback,

    /// Leave the shell
    Exit,
}

impl Command {
    /// Parse a line of input.
    ///
    /// Blank lines yield `Ok(None)`. The command word is case-insensitive;
    /// `SET` joins everything after the key with single spaces.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(word) = parts.first() else {
            return Ok(None);
        };

        let args = &parts[1..];
        let command = match word.to_ascii_uppercase().as_str() {
            "SET" => match args {
                [key, value @ ..] if !value.is_empty() => Command::Set {
                    key: key.to_string(),
                    value: value.join(" "),
                },
                _ => return Err(StackError::Usage(USAGE_SET.to_string())),
            },
            "GET" => Command::Get {
                key: single_arg(args, USAGE_GET)?,
            },
            "DELETE" => Command::Delete {
                key: single_arg(args, USAGE_DELETE)?,
            },
            "COUNT" => Command::Count {
                value: single_arg(args, USAGE_COUNT)?,
            },
            "BEGIN" => Command::Begin,
            "COMMIT" => Command::Commit,
            "ROLLBACK" => Command::Rollback,
            "EXIT" => Command::Exit,
            _ => return Err(StackError::UnknownCommand(word.to_string())),
        };

        Ok(Some(command))
    }

    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Set { .. } => CommandType::Set,
            Command::Get { .. } => CommandType::Get,
            Command::Delete { .. } => CommandType::Delete,
            Command::Count { .. } => CommandType::Count,
            Command::Begin => CommandType::Begin,
            Command::Commit => CommandType::Commit,
            Command::Rollback => CommandType::Rollback,
            Command::Exit => CommandType::Exit,
        }
    }
}

fn single_arg(args: &[&str], usage: &str) -> Result<String> {
    match args {
        [arg] => Ok(arg.to_string()),
        _ => Err(StackError::Usage(usage.to_string())),
    }
}
