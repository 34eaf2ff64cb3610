//! Reentrant transaction lock
//!
//! A reader/writer lock whose exclusive side can be acquired in one call
//! (`begin`) and released in another (`commit`/`rollback`). Scoped RAII
//! guards cannot express that, so ownership is tracked explicitly:
//!
//! ```text
//!            read()                    acquire_exclusive()
//!   Idle ──────────────► Shared(n)     Idle ───────────────► Exclusive(owner, 1)
//!    ▲   last reader out    │           ▲                      │   ▲
//!    └──────────────────────┘           │  release, depth==1   │   │ same thread
//!                                       └──────────────────────┘   │ acquires again
//!                                                    Exclusive(owner, depth+1)
//! ```
//!
//! The exclusive side is reentrant per thread, and the owner may also take
//! read guards. Every other thread waits on the condvar until the state
//! returns to `Idle`. While a writer is queued, new readers wait behind it,
//! so overlapping reads cannot starve `set` or `begin`. There is no timeout: a thread that never releases its
//! hold blocks everyone else forever.

use std::marker::PhantomData;
use std::thread::{self, ThreadId};

use parking_lot::{Condvar, Mutex};

use crate::error::{Result, StackError};

/// Who currently holds the lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// Nobody
    Idle,

    /// One or more readers, no writer
    Shared { readers: usize },

    /// A single thread, possibly several times over
    Exclusive { owner: ThreadId, depth: usize },
}

/// Ownership plus the number of threads queued for the exclusive side
#[derive(Debug)]
struct LockState {
    ownership: Ownership,
    waiting_writers: usize,
}

/// Reentrant reader/writer lock with hand-released exclusive holds
///
/// Queued writers take priority: once a thread waits for the exclusive side,
/// new readers from other threads wait behind it.
#[derive(Debug)]
pub struct TransactionLock {
    state: Mutex<LockState>,
    released: Condvar,
}

impl TransactionLock {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LockState {
                ownership: Ownership::Idle,
                waiting_writers: 0,
            }),
            released: Condvar::new(),
        }
    }

    /// Take a shared hold for the lifetime of the guard.
    ///
    /// Returns immediately if the current thread holds the exclusive side.
    pub fn read(&self) -> ReadGuard<'_> {
        let me = thread::current().id();
        let mut state = self.state.lock();

        loop {
            let current = state.ownership;
            match current {
                Ownership::Exclusive { owner, .. } if owner == me => {
                    return ReadGuard::new(self, false);
                }
                Ownership::Idle if state.waiting_writers == 0 => {
                    state.ownership = Ownership::Shared { readers: 1 };
                    return ReadGuard::new(self, true);
                }
                Ownership::Shared { readers } if state.waiting_writers == 0 => {
                    state.ownership = Ownership::Shared { readers: readers + 1 };
                    return ReadGuard::new(self, true);
                }
                _ => {
                    tracing::trace!(?me, state = ?current, "reader waiting behind writer");
                    self.released.wait(&mut state);
                }
            }
        }
    }

    /// Take an exclusive hold for the lifetime of the guard
    pub fn write(&self) -> WriteGuard<'_> {
        self.acquire_exclusive();
        WriteGuard {
            lock: self,
            _not_send: PhantomData,
        }
    }

    /// Take an exclusive hold that outlives the call.
    ///
    /// Blocks until no other thread holds the lock in either mode. Must be
    /// paired with `release_exclusive` on the same thread.
    pub fn acquire_exclusive(&self) {
        let me = thread::current().id();
        let mut state = self.state.lock();
        let mut queued = false;

        loop {
            let current = state.ownership;
            match current {
                Ownership::Idle => {
                    state.ownership = Ownership::Exclusive { owner: me, depth: 1 };
                    break;
                }
                Ownership::Exclusive { owner, depth } if owner == me => {
                    state.ownership = Ownership::Exclusive {
                        owner,
                        depth: depth + 1,
                    };
                    break;
                }
                Ownership::Shared { .. } | Ownership::Exclusive { .. } => {
                    if !queued {
                        state.waiting_writers += 1;
                        queued = true;
                    }
                    tracing::trace!(?me, state = ?current, "writer waiting for lock");
                    self.released.wait(&mut state);
                }
            }
        }

        if queued {
            state.waiting_writers -= 1;
            if state.waiting_writers == 0 {
                // Readers parked behind us may proceed once we release.
                drop(state);
                self.released.notify_all();
            }
        }
    }

    /// Drop one level of the current thread's exclusive hold.
    ///
    /// Wakes waiters once the outermost level is released.
    pub fn release_exclusive(&self) -> Result<()> {
        let me = thread::current().id();
        let mut state = self.state.lock();

        let current = state.ownership;
        match current {
            Ownership::Exclusive { owner, depth } if owner == me => {
                if depth == 1 {
                    state.ownership = Ownership::Idle;
                    drop(state);
                    self.released.notify_all();
                } else {
                    state.ownership = Ownership::Exclusive {
                        owner,
                        depth: depth - 1,
                    };
                }
                Ok(())
            }
            _ => Err(StackError::NotLockOwner),
        }
    }

    fn release_shared(&self) {
        let mut state = self.state.lock();

        if let Ownership::Shared { readers } = state.ownership {
            if readers <= 1 {
                state.ownership = Ownership::Idle;
                drop(state);
                self.released.notify_all();
            } else {
                state.ownership = Ownership::Shared {
                    readers: readers - 1,
                };
            }
        }
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Snapshot of the ownership state
    pub fn ownership(&self) -> Ownership {
        self.state.lock().ownership
    }

    /// Number of threads waiting for the exclusive side
    pub fn waiting_writers(&self) -> usize {
        self.state.lock().waiting_writers
    }

    /// Whether the calling thread holds the exclusive side
    pub fn is_held_by_current_thread(&self) -> bool {
        matches!(
            self.ownership(),
            Ownership::Exclusive { owner, .. } if owner == thread::current().id()
        )
    }
}

impl Default for TransactionLock {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared hold, released on drop
#[must_use]
pub struct ReadGuard<'a> {
    lock: &'a TransactionLock,
    /// `false` when taken by the exclusive owner, which is not counted
    counted: bool,
    _not_send: PhantomData<*const ()>,
}

impl<'a> ReadGuard<'a> {
    fn new(lock: &'a TransactionLock, counted: bool) -> Self {
        Self {
            lock,
            counted,
            _not_send: PhantomData,
        }
    }
}

impl Drop for ReadGuard<'_> {
    fn drop(&mut self) {
        if self.counted {
            self.lock.release_shared();
        }
    }
}

/// Exclusive hold, released on drop
#[must_use]
pub struct WriteGuard<'a> {
    lock: &'a TransactionLock,
    _not_send: PhantomData<*const ()>,
}

impl Drop for WriteGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.lock.release_exclusive() {
            tracing::error!("Failed to release scoped write hold: {}", e);
        }
    }
}
