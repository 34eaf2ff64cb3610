//! Operation logger
//!
//! Stores report a one-line summary after every operation (`SET k = v`,
//! `COMMIT successful`, ...). Nothing in the engine depends on it.

/// Sink for per-operation summaries. Must not fail or block.
pub trait OperationLogger: Send + Sync {
    fn log(&self, message: &str);
}

/// Forwards summaries to `tracing` under the `stackkv::ops` target
#[derive(Debug, Clone, Copy)]
pub struct TracingLogger {
    enabled: bool,
}

impl TracingLogger {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new(true)
    }
}

impl OperationLogger for TracingLogger {
    fn log(&self, message: &str) {
        if self.enabled {
            tracing::info!(target: "stackkv::ops", "{}", message);
        }
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl OperationLogger for NoopLogger {
    fn log(&self, _message: &str) {}
}
