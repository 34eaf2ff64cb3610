//! Configuration for StackKV
//!
//! Centralized configuration with sensible defaults.

use std::sync::Arc;

use crate::logger::{NoopLogger, OperationLogger, TracingLogger};
use crate::store::{ConcurrentStore, SynchronousStore, TransactionalStore};

/// Main configuration for a StackKV instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Store Configuration
    // -------------------------------------------------------------------------
    /// Which concurrency discipline the store uses
    pub variant: StoreVariant,

    // -------------------------------------------------------------------------
    // Logging Configuration
    // -------------------------------------------------------------------------
    /// Emit a log line after every store operation
    pub log_operations: bool,

    // -------------------------------------------------------------------------
    // Shell Configuration
    // -------------------------------------------------------------------------
    /// Prompt printed before each command is read
    pub prompt: String,
}

/// Concurrency discipline of the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreVariant {
    /// No locking, single thread only
    #[default]
    Synchronous,

    /// Global reentrant lock, held for the whole of a transaction
    Concurrent,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            variant: StoreVariant::Synchronous,
            log_operations: false,
            prompt: "> ".to_string(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Operation logger matching `log_operations`
    pub fn logger(&self) -> Arc<dyn OperationLogger> {
        if self.log_operations {
            Arc::new(TracingLogger::new(true))
        } else {
            Arc::new(NoopLogger)
        }
    }

    /// Build an empty store of the configured variant
    pub fn open_store(&self) -> Box<dyn TransactionalStore> {
        let logger = self.logger();
        match self.variant {
            StoreVariant::Synchronous => Box::new(SynchronousStore::with_logger(logger)),
            StoreVariant::Concurrent => Box::new(ConcurrentStore::with_logger(logger)),
        }
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the store variant
    pub fn variant(mut self, variant: StoreVariant) -> Self {
        self.config.variant = variant;
        self
    }

    /// Enable or disable per-operation logging
    pub fn log_operations(mut self, enabled: bool) -> Self {
        self.config.log_operations = enabled;
        self
    }

    /// Set the shell prompt
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.prompt = prompt.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
