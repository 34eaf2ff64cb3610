//! Error types for StackKV
//!
//! The engine itself never fails: `commit`/`rollback` report a missing
//! transaction by returning `false`. These errors cover the command shell
//! and the transaction lock.

use thiserror::Error;

/// Result type alias using StackError
pub type Result<T> = std::result::Result<T, StackError>;

/// Unified error type for StackKV operations
#[derive(Debug, Error)]
pub enum StackError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Command Errors
    // -------------------------------------------------------------------------
    /// Known command with the wrong number of arguments. Carries the usage line.
    #[error("{0}")]
    Usage(String),

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    // -------------------------------------------------------------------------
    // Concurrency Errors
    // -------------------------------------------------------------------------
    #[error("Transaction hold is not owned by the current thread")]
    NotLockOwner,
}
