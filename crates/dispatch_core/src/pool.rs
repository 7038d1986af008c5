//! Thread-safe FIFO pool of idle drivers with blocking acquisition.
//!
//! One monitor object (mutex + condvar + counter) guards the queue, the
//! closed flag, and the count of callers currently blocked in
//! [`IdleDriverPool::get_driver`]. The queue and counter are the only state
//! shared across regions.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Condvar, Mutex};

use crate::agents::Driver;

/// The maximum number of idle drivers the pool holds by default.
pub const MAX_IDLE_DRIVERS: usize = 999;

/// A synchronized FIFO pool of idle drivers.
///
/// Producers never block: an enqueue past the idle cap is rejected instead.
/// Consumers park on the condvar until a driver is enqueued or the pool is
/// closed.
pub struct IdleDriverPool {
    inner: Mutex<PoolState>,
    available: Condvar,
    awaiting: AtomicUsize,
    max_idle: usize,
}

struct PoolState {
    idle: VecDeque<Driver>,
    closed: bool,
}

impl IdleDriverPool {
    pub fn new() -> Self {
        Self::with_capacity(MAX_IDLE_DRIVERS)
    }

    pub fn with_capacity(max_idle: usize) -> Self {
        Self {
            inner: Mutex::new(PoolState {
                idle: VecDeque::new(),
                closed: false,
            }),
            available: Condvar::new(),
            awaiting: AtomicUsize::new(0),
            max_idle,
        }
    }

    /// Enqueue an idle driver and wake one blocked consumer.
    ///
    /// Returns false when the idle cap is reached. Returning drivers are
    /// accepted even after [`close`](Self::close) so bookings still in
    /// flight can recycle their driver for late waiters.
    pub fn add_driver(&self, driver: Driver) -> bool {
        let mut state = self.inner.lock().expect("idle pool mutex poisoned");
        if state.idle.len() >= self.max_idle {
            return false;
        }
        state.idle.push_back(driver);
        self.available.notify_one();
        true
    }

    /// Dequeue the driver that has been idle longest, blocking while the
    /// pool is empty.
    ///
    /// Returns `None` only when the pool has been closed and no driver is
    /// queued; a closed pool still hands out whatever drivers remain.
    pub fn get_driver(&self) -> Option<Driver> {
        let mut state = self.inner.lock().expect("idle pool mutex poisoned");
        if state.idle.is_empty() && !state.closed {
            // Count this caller as awaiting for the whole blocked span.
            self.awaiting.fetch_add(1, Ordering::SeqCst);
            while state.idle.is_empty() && !state.closed {
                state = self
                    .available
                    .wait(state)
                    .expect("idle pool condvar wait failed");
            }
            self.awaiting.fetch_sub(1, Ordering::SeqCst);
        }
        state.idle.pop_front()
    }

    /// Close the pool and wake every blocked consumer.
    ///
    /// Waiters that find the queue empty give up and return `None` instead
    /// of staying parked.
    pub fn close(&self) {
        let mut state = self.inner.lock().expect("idle pool mutex poisoned");
        state.closed = true;
        self.available.notify_all();
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().expect("idle pool mutex poisoned").closed
    }

    /// Number of callers currently blocked inside [`get_driver`](Self::get_driver).
    pub fn awaiting_count(&self) -> usize {
        self.awaiting.load(Ordering::SeqCst)
    }

    /// Current number of idle drivers.
    pub fn idle_count(&self) -> usize {
        self.inner.lock().expect("idle pool mutex poisoned").idle.len()
    }
}

impl Default for IdleDriverPool {
    fn default() -> Self {
        Self::new()
    }
}
