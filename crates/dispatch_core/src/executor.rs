//! Bounded-concurrency worker pool with graceful shutdown.
//!
//! Each region owns one pool, parameterized only by its capacity. Excess
//! jobs queue instead of running, which bounds resource use per region.

use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex};
use std::thread;

type Job = Box<dyn FnOnce() + Send + 'static>;

struct JobQueue {
    inner: Mutex<JobQueueState>,
    available: Condvar,
}

struct JobQueueState {
    jobs: VecDeque<Job>,
    closed: bool,
}

impl JobQueue {
    fn new() -> Self {
        Self {
            inner: Mutex::new(JobQueueState {
                jobs: VecDeque::new(),
                closed: false,
            }),
            available: Condvar::new(),
        }
    }

    /// Push a job; returns the job back if the queue is closed.
    fn push(&self, job: Job) -> Result<(), Job> {
        let mut guard = self.inner.lock().expect("job queue mutex poisoned");
        if guard.closed {
            return Err(job);
        }
        guard.jobs.push_back(job);
        self.available.notify_one();
        Ok(())
    }

    /// Block until a job is available, or return `None` once the queue is
    /// closed and drained.
    fn pop_blocking_or_closed(&self) -> Option<Job> {
        let mut guard = self.inner.lock().expect("job queue mutex poisoned");
        loop {
            if let Some(job) = guard.jobs.pop_front() {
                return Some(job);
            }
            if guard.closed {
                return None;
            }
            guard = self
                .available
                .wait(guard)
                .expect("job queue condvar wait failed");
        }
    }

    fn close(&self) {
        let mut guard = self.inner.lock().expect("job queue mutex poisoned");
        guard.closed = true;
        self.available.notify_all();
    }

    fn len(&self) -> usize {
        self.inner.lock().expect("job queue mutex poisoned").jobs.len()
    }
}

/// A fixed set of named worker threads draining a shared FIFO job queue.
pub struct WorkerPool {
    queue: Arc<JobQueue>,
    workers: Vec<thread::JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawn `workers` threads named `{name}-worker-{i}`.
    pub fn new(name: &str, workers: usize) -> Self {
        let queue = Arc::new(JobQueue::new());
        let mut handles = Vec::with_capacity(workers);
        for i in 0..workers {
            let queue = Arc::clone(&queue);
            let handle = thread::Builder::new()
                .name(format!("{name}-worker-{i}"))
                .spawn(move || {
                    while let Some(job) = queue.pop_blocking_or_closed() {
                        // A panicking job must not take the worker down with it.
                        let _ = panic::catch_unwind(AssertUnwindSafe(job));
                    }
                })
                .expect("failed to spawn worker thread");
            handles.push(handle);
        }
        Self {
            queue,
            workers: handles,
        }
    }

    /// Schedule a job, or hand it back untouched if the pool is shut down.
    pub fn submit<F>(&self, job: F) -> Result<(), Job>
    where
        F: FnOnce() + Send + 'static,
    {
        self.queue.push(Box::new(job))
    }

    /// Number of jobs queued but not yet picked up by a worker.
    pub fn queued_jobs(&self) -> usize {
        self.queue.len()
    }

    /// Stop accepting jobs, run everything already queued, and join the
    /// workers. Nothing accepted is ever discarded.
    pub fn shutdown(self) {
        self.queue.close();
        for handle in self.workers {
            handle.join().expect("worker thread panicked");
        }
    }
}
