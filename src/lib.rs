//! # StackKV
//!
//! An in-process key-value store with nested transactions:
//! - Overlay frames pushed by `BEGIN`, merged by `COMMIT`, dropped by `ROLLBACK`
//! - Tombstones so a commit can tell "deleted" from "untouched"
//! - A single-threaded variant and a global-lock multi-threaded variant
//! - A line-oriented command shell
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Command Shell                          │
//! │                (SET/GET/.../BEGIN/COMMIT)                   │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                 TransactionalStore                          │
//! │     SynchronousStore  |  ConcurrentStore (TransactionLock)  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!                       ▼
//!               ┌──────────────────┐
//!               │ TransactionStack │
//!               │  frames[depth-1] │ ◄── current frame
//!               │       ...        │
//!               │      base        │
//!               └──────────────────┘
//! ```
//!
//! Every operation resolves against the current frame only. A transaction
//! does not see keys it has not written itself, including keys committed
//! before it began.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;
pub mod logger;

pub mod frame;
pub mod store;
pub mod shell;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{StackError, Result};
pub use config::{Config, StoreVariant};
pub use logger::{NoopLogger, OperationLogger, TracingLogger};
pub use store::{ConcurrentStore, SynchronousStore, TransactionalStore};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of StackKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
