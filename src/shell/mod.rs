//! Shell Module
//!
//! Line-oriented command interface over a store.
//!
//! ## Commands
//! ```text
//! SET <key> <value>    value may contain spaces
//! GET <key>
//! DELETE <key>
//! COUNT <value>
//! BEGIN | COMMIT | ROLLBACK
//! EXIT
//! ```
//!
//! Command words are case-insensitive. Wrong arity prints the command's
//! usage line, anything else prints the command list.

mod command;
mod repl;

pub use command::{
    Command, CommandType, HELP, USAGE_COMMIT, USAGE_COUNT, USAGE_DELETE, USAGE_GET,
    USAGE_ROLLBACK, USAGE_SET,
};
pub use repl::{Repl, EXITING, KEY_NOT_SET, WELCOME};
