//! Store Module
//!
//! The transactional store engine in two concurrency disciplines.
//!
//! ## Variants
//! - [`SynchronousStore`]: no locking at all. `!Sync`, so it cannot be
//!   shared between threads.
//! - [`ConcurrentStore`]: every call goes through a [`TransactionLock`].
//!   Plain calls hold it for one operation; `begin` takes the exclusive side
//!   and keeps it until the matching `commit`/`rollback`, so an open
//!   transaction serializes the whole store.
//!
//! Both delegate the frame logic to [`TransactionStack`](crate::frame::TransactionStack).

mod concurrent;
mod lock;
mod synchronous;

pub use concurrent::ConcurrentStore;
pub use lock::{Ownership, ReadGuard, TransactionLock, WriteGuard};
pub use synchronous::SynchronousStore;

/// Operations shared by both store variants
///
/// Every operation resolves against the current frame: the innermost open
/// transaction, or the base store when none is open.
pub trait TransactionalStore {
    /// Write `value` for `key` in the current frame
    fn set(&self, key: &str, value: &str);

    /// Value for `key` in the current frame. Deleted and never-written keys
    /// both read as `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Delete `key` from the current frame. Succeeds whether or not it exists.
    fn delete(&self, key: &str);

    /// Number of keys in the current frame holding `value`
    fn count(&self, value: &str) -> usize;

    /// Open a nested transaction
    fn begin(&self);

    /// Merge the innermost transaction into its parent. `false` if none is open.
    fn commit(&self) -> bool;

    /// Discard the innermost transaction. `false` if none is open.
    fn rollback(&self) -> bool;

    /// Number of open transactions
    fn transaction_depth(&self) -> usize;
}

// =============================================================================
// Operation log lines
// =============================================================================

fn set_message(key: &str, value: &str) -> String {
    format!("SET {} = {}", key, value)
}

fn get_message(key: &str, value: Option<&str>) -> String {
    format!("GET {} = {}", key, value.unwrap_or("<not set>"))
}

fn delete_message(key: &str) -> String {
    format!("DELETE {}", key)
}

fn count_message(value: &str, count: usize) -> String {
    format!("COUNT {} = {}", value, count)
}

const BEGIN_MESSAGE: &str = "BEGIN transaction";
const COMMIT_OK: &str = "COMMIT successful";
const COMMIT_FAILED: &str = "COMMIT failed: no transaction";
const ROLLBACK_OK: &str = "ROLLBACK successful";
const ROLLBACK_FAILED: &str = "ROLLBACK failed: no transaction";
