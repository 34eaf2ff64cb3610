//! Read-eval-print loop
//!
//! Reads commands line by line, runs them against a store and writes a
//! human-readable reply for each.

use std::io::{BufRead, Write};

use super::command::{self, Command};
use crate::error::{Result, StackError};
use crate::store::TransactionalStore;

pub const WELCOME: &str = "Welcome to the Transactional Key Value Store CLI";
pub const KEY_NOT_SET: &str = "key not set";
pub const EXITING: &str = "Exiting CLI...";

/// Drives a store from a line-oriented input stream
pub struct Repl<'a, R, W> {
    store: &'a dyn TransactionalStore,
    input: R,
    output: W,
    prompt: String,
}

impl<'a, R: BufRead, W: Write> Repl<'a, R, W> {
    /// Create a REPL with the default `"> "` prompt
    pub fn new(store: &'a dyn TransactionalStore, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
            prompt: "> ".to_string(),
        }
    }

    /// Replace the prompt
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Run until `EXIT` or end of input.
    ///
    /// Returns the number of commands executed, including `EXIT`.
    pub fn run(&mut self) -> Result<usize> {
        writeln!(self.output, "{}", WELCOME)?;
        let mut executed = 0;

        loop {
            write!(self.output, "{}", self.prompt)?;
            self.output.flush()?;

            let mut buf = Vec::new();
            if self.input.read_until(b'\n', &mut buf)? == 0 {
                tracing::debug!("input closed after {} commands", executed);
                break;
            }
            // Invalid UTF-8 is replaced rather than ending the session.
            let line = String::from_utf8_lossy(&buf);

            let command = match Command::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(StackError::Usage(usage)) => {
                    writeln!(self.output, "{}", usage)?;
                    continue;
                }
                Err(StackError::UnknownCommand(word)) => {
                    tracing::debug!("unknown command {:?}", word);
                    writeln!(self.output, "{}", command::HELP)?;
                    continue;
                }
                Err(e) => return Err(e),
            };

            tracing::trace!("executing {:?}", command);
            executed += 1;

            let exit = command == Command::Exit;
            let reply = self.execute(command);
            writeln!(self.output, "{}", reply)?;

            if exit {
                break;
            }
        }

        self.output.flush()?;
        Ok(executed)
    }

    /// Run one command and render its reply
    fn execute(&self, command: Command) -> String {
        match command {
            Command::Set { key, value } => {
                self.store.set(&key, &value);
                "Value set.".to_string()
            }
            Command::Get { key } => self
                .store
                .get(&key)
                .unwrap_or_else(|| KEY_NOT_SET.to_string()),
            Command::Delete { key } => {
                self.store.delete(&key);
                "Key deleted.".to_string()
            }
            Command::Count { value } => format!("Count: {}", self.store.count(&value)),
            Command::Begin => {
                self.store.begin();
                "Transaction started.".to_string()
            }
            Command::Commit => {
                if self.store.commit() {
                    "Transaction committed.".to_string()
                } else {
                    command::USAGE_COMMIT.to_string()
                }
            }
            Command::Rollback => {
                if self.store.rollback() {
                    "Transaction rolled back.".to_string()
                } else {
                    command::USAGE_ROLLBACK.to_string()
                }
            }
            Command::Exit => EXITING.to_string(),
        }
    }

    /// Consume the REPL and return its output sink
    pub fn into_output(self) -> W {
        self.output
    }
}
