//! Multi-threaded store
//!
//! ## Locking protocol
//!
//! | call              | hold on `lock`                                   |
//! |-------------------|--------------------------------------------------|
//! | `get`, `count`    | shared, for the call                             |
//! | `set`, `delete`   | exclusive, for the call                          |
//! | `begin`           | exclusive, kept after the call returns           |
//! | `commit`/`rollback` | exclusive for the call, then drops `begin`'s hold |
//!
//! The hold is reentrant, so the thread that opened a transaction keeps
//! working (and may nest further) while every other thread blocks until the
//! outermost `commit`/`rollback`. The inner `RwLock` only makes the stack
//! reachable from `&self`; it is never held across calls.

use std::sync::Arc;

use parking_lot::RwLock;

use super::*;
use crate::frame::TransactionStack;
use crate::logger::{OperationLogger, TracingLogger};

/// Transactional store safe to share between threads
pub struct ConcurrentStore {
    /// Governs the protocol above
    lock: TransactionLock,

    stack: RwLock<TransactionStack>,

    logger: Arc<dyn OperationLogger>,
}

impl ConcurrentStore {
    /// Create an empty store that logs operations through `tracing`
    pub fn new() -> Self {
        Self::with_logger(Arc::new(TracingLogger::default()))
    }

    /// Create an empty store reporting to `logger`
    pub fn with_logger(logger: Arc<dyn OperationLogger>) -> Self {
        Self {
            lock: TransactionLock::new(),
            stack: RwLock::new(TransactionStack::new()),
            logger,
        }
    }

    /// Current owner of the transaction lock
    pub fn ownership(&self) -> Ownership {
        self.lock.ownership()
    }

    /// Drop the hold taken by the `begin` that opened the frame just closed
    fn release_transaction_hold(&self, op: &str) {
        if let Err(e) = self.lock.release_exclusive() {
            tracing::error!("{} could not release transaction hold: {}", op, e);
        }
    }
}

impl Default for ConcurrentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionalStore for ConcurrentStore {
    fn set(&self, key: &str, value: &str) {
        let _guard = self.lock.write();
        self.stack.write().set(key, value);
        self.logger.log(&set_message(key, value));
    }

    fn get(&self, key: &str) -> Option<String> {
        let _guard = self.lock.read();
        let value = self.stack.read().get(key);
        self.logger.log(&get_message(key, value.as_deref()));
        value
    }

    fn delete(&self, key: &str) {
        let _guard = self.lock.write();
        self.stack.write().delete(key);
        self.logger.log(&delete_message(key));
    }

    fn count(&self, value: &str) -> usize {
        let _guard = self.lock.read();
        let count = self.stack.read().count(value);
        self.logger.log(&count_message(value, count));
        count
    }

    fn begin(&self) {
        // Released by commit/rollback, not here.
        self.lock.acquire_exclusive();
        self.stack.write().begin();
        tracing::debug!("transaction hold taken, ownership {:?}", self.lock.ownership());
        self.logger.log(BEGIN_MESSAGE);
    }

    fn commit(&self) -> bool {
        let _guard = self.lock.write();

        let committed = self.stack.write().commit();
        if !committed {
            self.logger.log(COMMIT_FAILED);
            return false;
        }

        self.release_transaction_hold("COMMIT");
        self.logger.log(COMMIT_OK);
        true
    }

    fn rollback(&self) -> bool {
        let _guard = self.lock.write();

        let rolled_back = self.stack.write().rollback();
        if !rolled_back {
            self.logger.log(ROLLBACK_FAILED);
            return false;
        }

        self.release_transaction_hold("ROLLBACK");
        self.logger.log(ROLLBACK_OK);
        true
    }

    fn transaction_depth(&self) -> usize {
        let _guard = self.lock.read();
        self.stack.read().depth()
    }
}
