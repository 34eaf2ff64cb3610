//! Tests for ConcurrentStore
//!
//! These tests verify:
//! - The same single-thread semantics as the synchronous store
//! - An open transaction blocks every other thread
//! - Reentrant nesting on the owning thread
//! - Transactions from different threads never interleave
//! - Concurrent non-transactional access
//! - Queued writers are not starved by readers

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam::channel::{self, RecvTimeoutError};
use stackkv::store::Ownership;
use stackkv::{ConcurrentStore, NoopLogger, TransactionalStore};

use crate::RecordingLogger;

// =============================================================================
// Helper Functions
// =============================================================================

fn quiet_store() -> ConcurrentStore {
    ConcurrentStore::with_logger(Arc::new(NoopLogger))
}

fn assert_send_sync<T: Send + Sync>() {}

const BLOCKED_FOR: Duration = Duration::from_millis(100);

// =============================================================================
// Single Thread Semantics Tests
// =============================================================================

#[test]
fn test_store_is_send_and_sync() {
    assert_send_sync::<ConcurrentStore>();
}

#[test]
fn test_set_get_delete_count() {
    let store = quiet_store();
    store.set("foo", "123");
    store.set("bar", "456");
    store.set("baz", "123");
    assert_eq!(store.get("foo"), Some("123".to_string()));
    assert_eq!(store.count("123"), 2);

    store.delete("foo");
    assert_eq!(store.get("foo"), None);
    assert_eq!(store.count("123"), 1);
    assert_eq!(store.ownership(), Ownership::Idle);
}

#[test]
fn test_commit_transaction() {
    let store = quiet_store();
    store.set("bar", "123");

    store.begin();
    store.set("foo", "456");
    store.delete("bar");
    assert_eq!(store.get("bar"), None);
    assert!(store.commit());

    assert_eq!(store.get("bar"), None);
    assert_eq!(store.get("foo"), Some("456".to_string()));
    assert_eq!(store.ownership(), Ownership::Idle);
}

#[test]
fn test_nested_transactions() {
    let store = quiet_store();
    store.set("foo", "123");

    store.begin();
    store.set("foo", "456");
    store.begin();
    store.set("foo", "789");

    assert!(matches!(
        store.ownership(),
        Ownership::Exclusive { depth: 2, .. }
    ));

    assert!(store.rollback());
    assert_eq!(store.get("foo"), Some("456".to_string()));
    assert!(matches!(
        store.ownership(),
        Ownership::Exclusive { depth: 1, .. }
    ));

    assert!(store.rollback());
    assert_eq!(store.get("foo"), Some("123".to_string()));
    assert_eq!(store.ownership(), Ownership::Idle);
}

#[test]
fn test_no_transaction() {
    let store = quiet_store();
    assert!(!store.commit());
    assert!(!store.rollback());
    assert_eq!(store.ownership(), Ownership::Idle);
}

#[test]
fn test_transaction_sees_only_its_own_writes() {
    let store = quiet_store();
    store.set("foo", "123");

    store.begin();
    assert_eq!(store.get("foo"), None);
    assert_eq!(store.count("123"), 0);
    assert!(store.rollback());

    assert_eq!(store.get("foo"), Some("123".to_string()));
}

#[test]
fn test_operation_log_lines() {
    let logger = RecordingLogger::new();
    let store = ConcurrentStore::with_logger(logger.clone());

    store.begin();
    store.set("k", "v");
    store.rollback();
    store.rollback();

    assert_eq!(
        logger.lines(),
        vec![
            "BEGIN transaction",
            "SET k = v",
            "ROLLBACK successful",
            "ROLLBACK failed: no transaction",
        ]
    );
}

// =============================================================================
// Locking Protocol Tests
// =============================================================================

#[test]
fn test_parallel_thread_transactions() {
    let store = quiet_store();

    crossbeam::thread::scope(|s| {
        s.spawn(|_| {
            store.begin();
            thread::sleep(Duration::from_millis(100));
            store.set("key1", "value1");
            assert!(store.commit());
        });

        s.spawn(|_| {
            // Starts after the first transaction has begun
            thread::sleep(Duration::from_millis(50));
            store.begin();
            store.set("key1", "value2");
            assert!(store.commit());
        });
    })
    .unwrap();

    assert_eq!(store.get("key1"), Some("value2".to_string()));
    assert_eq!(store.ownership(), Ownership::Idle);
}

#[test]
fn test_open_transaction_blocks_other_readers() {
    let store = quiet_store();
    let (tx, rx) = channel::unbounded();

    store.begin();
    store.set("k", "v");

    crossbeam::thread::scope(|s| {
        s.spawn(|_| {
            tx.send(store.get("k")).unwrap();
        });

        assert_eq!(rx.recv_timeout(BLOCKED_FOR), Err(RecvTimeoutError::Timeout));

        assert!(store.commit());
        assert_eq!(rx.recv().unwrap(), Some("v".to_string()));
    })
    .unwrap();
}

#[test]
fn test_open_transaction_blocks_other_writers() {
    let store = quiet_store();
    let (tx, rx) = channel::unbounded();

    store.begin();

    crossbeam::thread::scope(|s| {
        s.spawn(|_| {
            store.set("k", "outside");
            tx.send(()).unwrap();
        });

        assert_eq!(rx.recv_timeout(BLOCKED_FOR), Err(RecvTimeoutError::Timeout));

        store.set("k", "inside");
        assert!(store.rollback());
        rx.recv().unwrap();
    })
    .unwrap();

    assert_eq!(store.get("k"), Some("outside".to_string()));
}

#[test]
fn test_commit_from_other_thread_waits_then_fails() {
    let store = quiet_store();
    let (tx, rx) = channel::unbounded();

    store.begin();

    crossbeam::thread::scope(|s| {
        s.spawn(|_| {
            tx.send(store.commit()).unwrap();
        });

        assert_eq!(rx.recv_timeout(BLOCKED_FOR), Err(RecvTimeoutError::Timeout));

        assert!(store.commit());
        // The owner already closed the only transaction
        assert!(!rx.recv().unwrap());
    })
    .unwrap();

    assert_eq!(store.ownership(), Ownership::Idle);
}

#[test]
fn test_transactions_never_interleave() {
    let store = Arc::new(quiet_store());
    let mut handles = Vec::new();

    for t in 0..4 {
        let store = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            for i in 0..25 {
                store.begin();
                // Nothing from another thread can land between these calls
                store.set("owner", &t.to_string());
                thread::yield_now();
                assert_eq!(store.get("owner"), Some(t.to_string()));
                store.set(&format!("thread{}_key{}", t, i), "done");
                assert!(store.commit());
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.count("done"), 100);
    assert_eq!(store.ownership(), Ownership::Idle);
}

#[test]
fn test_concurrent_plain_writes_and_reads() {
    let store = quiet_store();

    crossbeam::thread::scope(|s| {
        for t in 0..4 {
            let store = &store;
            s.spawn(move |_| {
                for i in 0..100 {
                    store.set(&format!("thread{}_key{}", t, i), &format!("value{}", t));
                    let _ = store.count("value0");
                }
            });
        }
    })
    .unwrap();

    for t in 0..4 {
        assert_eq!(store.count(&format!("value{}", t)), 100);
    }
    assert_eq!(store.get("thread3_key99"), Some("value3".to_string()));
}

#[test]
fn test_plain_write_not_starved_by_overlapping_counts() {
    let store = quiet_store();
    for i in 0..20_000 {
        store.set(&format!("key{}", i), "v");
    }

    let stop = AtomicBool::new(false);
    let (tx, rx) = channel::bounded(1);

    crossbeam::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|_| {
                while !stop.load(Ordering::SeqCst) {
                    let _ = store.count("v");
                }
            });
        }

        thread::sleep(Duration::from_millis(20));
        s.spawn(|_| {
            store.set("writer", "x");
            tx.send(()).unwrap();
        });

        let acquired = rx.recv_timeout(Duration::from_secs(2)).is_ok();
        stop.store(true, Ordering::SeqCst);
        assert!(acquired, "set stayed blocked while counts kept overlapping");
    })
    .unwrap();

    assert_eq!(store.get("writer"), Some("x".to_string()));
}
