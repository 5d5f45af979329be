//! Tests for the lock primitives.

use super::*;
use crate::test_support::wait_until;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

fn both() -> Vec<Arc<dyn RawLock>> {
    let semaphore: Arc<dyn RawLock> = Arc::new(BinarySemaphore::new());
    let ticket: Arc<dyn RawLock> = Arc::new(TicketLock::new());
    vec![semaphore, ticket]
}

#[test]
fn test_new_lock_is_free() {
    for lock in both() {
        assert!(!lock.is_locked(), "{:?}", lock);
        assert_eq!(lock.waiters(), 0);
    }
}

#[test]
fn test_try_acquire_respects_holder() {
    for lock in both() {
        assert!(lock.try_acquire());
        assert!(lock.is_locked());
        assert!(!lock.try_acquire());

        lock.release();
        assert!(!lock.is_locked());
        assert!(lock.try_acquire());
        lock.release();
    }
}

#[test]
fn test_release_from_another_thread() {
    for lock in both() {
        lock.acquire();

        let remote = Arc::clone(&lock);
        thread::spawn(move || remote.release()).join().unwrap();

        assert!(!lock.is_locked());
        assert!(lock.try_acquire());
        lock.release();
    }
}

#[test]
fn test_acquire_blocks_until_release() {
    for lock in both() {
        lock.acquire();
        let entered = Arc::new(AtomicBool::new(false));

        let handle = {
            let lock = Arc::clone(&lock);
            let entered = Arc::clone(&entered);
            thread::spawn(move || {
                lock.acquire();
                entered.store(true, Ordering::SeqCst);
                lock.release();
            })
        };

        wait_until("a blocked waiter", || lock.waiters() == 1);
        assert!(!entered.load(Ordering::SeqCst));

        lock.release();
        handle.join().unwrap();
        assert!(entered.load(Ordering::SeqCst));
        assert!(!lock.is_locked());
    }
}

#[test]
fn test_ticket_lock_grants_in_arrival_order() {
    let lock = Arc::new(TicketLock::new());
    let order = Arc::new(Mutex::new(Vec::new()));
    lock.acquire();

    let mut handles = Vec::new();
    for id in 0..5 {
        let lock_for_thread = Arc::clone(&lock);
        let order = Arc::clone(&order);
        handles.push(thread::spawn(move || {
            lock_for_thread.acquire();
            order.lock().unwrap().push(id);
            lock_for_thread.release();
        }));
        // Ticket `id` is drawn before the next thread is started.
        wait_until("ticket to be drawn", || lock.waiters() == id + 1);
    }

    lock.release();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_mutual_exclusion_under_contention() {
    for lock in both() {
        let inside = Arc::new(AtomicUsize::new(0));
        let overlaps = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let lock = Arc::clone(&lock);
                let inside = Arc::clone(&inside);
                let overlaps = Arc::clone(&overlaps);
                thread::spawn(move || {
                    for _ in 0..200 {
                        lock.acquire();
                        if inside.fetch_add(1, Ordering::SeqCst) != 0 {
                            overlaps.fetch_add(1, Ordering::SeqCst);
                        }
                        thread::yield_now();
                        inside.fetch_sub(1, Ordering::SeqCst);
                        lock.release();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(overlaps.load(Ordering::SeqCst), 0, "{:?}", lock);
        assert!(!lock.is_locked());
        assert_eq!(lock.waiters(), 0);
    }
}
