//! Single-threaded store
//!
//! Plain interior mutability over the transaction stack. Useful as a
//! baseline; the `RefCell` keeps it off other threads.

use std::cell::RefCell;
use std::sync::Arc;

use super::*;
use crate::frame::TransactionStack;
use crate::logger::{OperationLogger, TracingLogger};

/// Unsynchronized transactional store
pub struct SynchronousStore {
    stack: RefCell<TransactionStack>,
    logger: Arc<dyn OperationLogger>,
}

impl SynchronousStore {
    /// Create an empty store that logs operations through `tracing`
    pub fn new() -> Self {
        Self::with_logger(Arc::new(TracingLogger::default()))
    }

    /// Create an empty store reporting to `logger`
    pub fn with_logger(logger: Arc<dyn OperationLogger>) -> Self {
        Self {
            stack: RefCell::new(TransactionStack::new()),
            logger,
        }
    }
}

impl Default for SynchronousStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionalStore for SynchronousStore {
    fn set(&self, key: &str, value: &str) {
        self.stack.borrow_mut().set(key, value);
        self.logger.log(&set_message(key, value));
    }

    fn get(&self, key: &str) -> Option<String> {
        let value = self.stack.borrow().get(key);
        self.logger.log(&get_message(key, value.as_deref()));
        value
    }

    fn delete(&self, key: &str) {
        self.stack.borrow_mut().delete(key);
        self.logger.log(&delete_message(key));
    }

    fn count(&self, value: &str) -> usize {
        let count = self.stack.borrow().count(value);
        self.logger.log(&count_message(value, count));
        count
    }

    fn begin(&self) {
        self.stack.borrow_mut().begin();
        self.logger.log(BEGIN_MESSAGE);
    }

    fn commit(&self) -> bool {
        let committed = self.stack.borrow_mut().commit();
        self.logger
            .log(if committed { COMMIT_OK } else { COMMIT_FAILED });
        committed
    }

    fn rollback(&self) -> bool {
        let rolled_back = self.stack.borrow_mut().rollback();
        self.logger
            .log(if rolled_back { ROLLBACK_OK } else { ROLLBACK_FAILED });
        rolled_back
    }

    fn transaction_depth(&self) -> usize {
        self.stack.borrow().depth()
    }
}
