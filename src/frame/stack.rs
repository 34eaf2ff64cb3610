//! Transaction stack implementation
//!
//! Base map plus a `Vec` of overlay frames indexed by depth. Not
//! synchronized; the store variants decide how access is guarded.

use std::collections::HashMap;

use super::{Frame, FrameEntry};

/// Base store and the stack of open transaction frames
#[derive(Debug, Default)]
pub struct TransactionStack {
    /// Committed values. Never holds tombstones.
    base: HashMap<String, String>,

    /// Open frames, last element is the current one
    frames: Vec<Frame>,
}

impl TransactionStack {
    /// Create an empty stack with an empty base store
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `value` into the current frame
    pub fn set(&mut self, key: &str, value: &str) {
        match self.frames.last_mut() {
            Some(frame) => {
                frame.insert(key.to_string(), FrameEntry::Present(value.to_string()));
            }
            None => {
                self.base.insert(key.to_string(), value.to_string());
            }
        }
    }

    /// Read `key` from the current frame. Tombstones read as not set.
    pub fn get(&self, key: &str) -> Option<String> {
        match self.frames.last() {
            Some(frame) => frame.get(key).and_then(FrameEntry::value).map(str::to_string),
            None => self.base.get(key).cloned(),
        }
    }

    /// Tombstone `key` inside a transaction, otherwise remove it from the base
    pub fn delete(&mut self, key: &str) {
        match self.frames.last_mut() {
            Some(frame) => {
                frame.insert(key.to_string(), FrameEntry::Tombstone);
            }
            None => {
                self.base.remove(key);
            }
        }
    }

    /// Number of entries in the current frame holding exactly `value`
    pub fn count(&self, value: &str) -> usize {
        match self.frames.last() {
            Some(frame) => frame
                .values()
                .filter(|entry| entry.value() == Some(value))
                .count(),
            None => self.base.values().filter(|v| v.as_str() == value).count(),
        }
    }

    /// Push a new empty frame
    pub fn begin(&mut self) {
        self.frames.push(Frame::new());
    }

    /// Merge the top frame into its parent, or apply it to the base store
    /// when it is the bottom frame.
    ///
    /// Returns `false` and changes nothing when no transaction is open.
    pub fn commit(&mut self) -> bool {
        let Some(top) = self.frames.pop() else {
            return false;
        };

        match self.frames.last_mut() {
            Some(parent) => parent.extend(top),
            None => {
                for (key, entry) in top {
                    match entry {
                        FrameEntry::Present(value) => {
                            self.base.insert(key, value);
                        }
                        FrameEntry::Tombstone => {
                            self.base.remove(&key);
                        }
                    }
                }
            }
        }

        true
    }

    /// Discard the top frame. Returns `false` when no transaction is open.
    pub fn rollback(&mut self) -> bool {
        self.frames.pop().is_some()
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Number of open transaction frames
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Whether a transaction is open
    pub fn in_transaction(&self) -> bool {
        !self.frames.is_empty()
    }

    /// Number of keys in the base store
    pub fn base_len(&self) -> usize {
        self.base.len()
    }
}
