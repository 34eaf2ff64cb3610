//! Frame Module
//!
//! Transaction frames layered over the base store.
//!
//! ## Responsibilities
//! - Hold the base key/value mapping
//! - Push an empty overlay frame on `begin`
//! - Merge the top frame downwards on `commit`, discard it on `rollback`
//! - Resolve every read and write against the current frame only
//!
//! ## Layout
//! ```text
//!   frames[depth-1]  ◄── current frame (if any)
//!   ...
//!   frames[0]
//!   base             ◄── current frame when no transaction is open
//! ```
//!
//! A frame never looks through to its parents or the base store. A key set
//! before `begin` reads as not set inside the transaction until the
//! transaction writes it.

mod stack;

use std::collections::HashMap;

pub use stack::TransactionStack;

/// Entry stored in an overlay frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameEntry {
    /// A live value
    Present(String),

    /// Deleted within this frame
    Tombstone,
}

impl FrameEntry {
    /// The live value, or `None` for a tombstone
    pub fn value(&self) -> Option<&str> {
        match self {
            FrameEntry::Present(value) => Some(value),
            FrameEntry::Tombstone => None,
        }
    }
}

/// Deltas recorded while a transaction was topmost
pub type Frame = HashMap<String, FrameEntry>;
