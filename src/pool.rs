//! Bounded worker pool with explicit shutdown and timed termination.
//!
//! [`WorkerPool`] runs a fixed number of worker threads that pull jobs from a
//! shared queue. Its lifecycle mirrors a classic executor service:
//!
//! ```text
//!   submit* ──► shutdown() ──► await_termination(timeout) ──┬─► terminated
//!                                                           │
//!                                              timed out ───┴─► shutdown_now()
//! ```
//!
//! - [`submit`](WorkerPool::submit) queues a closure and returns a
//!   [`TaskHandle`] for its result.
//! - [`shutdown`](WorkerPool::shutdown) stops accepting work; queued jobs
//!   still run.
//! - [`await_termination`](WorkerPool::await_termination) blocks until every
//!   worker has exited or the timeout elapses.
//! - [`shutdown_now`](WorkerPool::shutdown_now) drops every job that has not
//!   started. Their handles report [`TaskError::Cancelled`]. Jobs already
//!   running are not preempted.
//!
//! A panicking job never takes its worker down: the panic is captured and
//! surfaces as [`TaskError::Panicked`] when the handle is joined.

use std::any::Any;
use std::fmt::Debug;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use parking_lot::{Condvar, Mutex};

use crate::error::{PoolError, TaskError};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// State shared between the pool handle and its workers.
struct PoolState {
    /// Number of workers that have not exited yet.
    live: Mutex<usize>,
    /// Signalled every time a worker exits.
    terminated: Condvar,
    /// Set by `shutdown_now`; workers drop any job they dequeue afterwards.
    cancelled: AtomicBool,
}

/// Decrements the live-worker count when a worker exits, however it exits.
struct ExitGuard(Arc<PoolState>);

impl Drop for ExitGuard {
    fn drop(&mut self) {
        let mut live = self.0.live.lock();
        *live -= 1;
        self.0.terminated.notify_all();
    }
}

/// A fixed-size pool of worker threads.
///
/// # Examples
///
/// ```rust
/// use contesa::pool::WorkerPool;
/// use std::time::Duration;
///
/// let pool = WorkerPool::new(4).unwrap();
/// let handles: Vec<_> = (0..8)
///     .map(|i| pool.submit(move || i * 2).unwrap())
///     .collect();
///
/// pool.shutdown();
/// assert!(pool.await_termination(Duration::from_secs(5)));
///
/// let results: Vec<i32> = handles.into_iter().map(|h| h.join().unwrap()).collect();
/// assert_eq!(results, vec![0, 2, 4, 6, 8, 10, 12, 14]);
/// ```
pub struct WorkerPool {
    size: usize,
    sender: Mutex<Option<Sender<Job>>>,
    queue: Receiver<Job>,
    state: Arc<PoolState>,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl WorkerPool {
    /// Starts a pool of `size` worker threads.
    ///
    /// Fails with [`PoolError::ZeroWorkers`] when `size` is zero, or
    /// [`PoolError::Spawn`] when a worker thread cannot be started.
    pub fn new(size: usize) -> Result<Self, PoolError> {
        if size == 0 {
            return Err(PoolError::ZeroWorkers);
        }

        let (sender, queue) = crossbeam_channel::unbounded::<Job>();
        let state = Arc::new(PoolState {
            live: Mutex::new(0),
            terminated: Condvar::new(),
            cancelled: AtomicBool::new(false),
        });

        let mut workers = Vec::with_capacity(size);
        for id in 0..size {
            *state.live.lock() += 1;
            let guard = ExitGuard(Arc::clone(&state));
            let jobs = queue.clone();
            let spawned = thread::Builder::new()
                .name(format!("contesa-worker-{id}"))
                .spawn(move || worker_loop(id, jobs, guard));
            match spawned {
                Ok(handle) => workers.push(handle),
                // The closure, and with it the guard, was dropped: the live
                // count is already back in sync. Dropping `sender` on return
                // lets the workers started so far drain and exit.
                Err(err) => return Err(PoolError::Spawn(err)),
            }
        }

        tracing::debug!(size, "worker pool started");

        Ok(WorkerPool {
            size,
            sender: Mutex::new(Some(sender)),
            queue,
            state,
            workers: Mutex::new(workers),
        })
    }

    /// Returns the number of worker threads.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Queues `task` and returns a handle to its result.
    ///
    /// Fails with [`PoolError::Shutdown`] once [`shutdown`](Self::shutdown)
    /// has been called.
    pub fn submit<F, R>(&self, task: F) -> Result<TaskHandle<R>, PoolError>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        let sender = self.sender.lock();
        let sender = sender.as_ref().ok_or(PoolError::Shutdown)?;

        let (tx, rx) = crossbeam_channel::bounded(1);
        let job: Job = Box::new(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(task));
            // The handle may have been dropped; nobody is waiting then.
            let _ = tx.send(outcome);
        });

        sender.send(job).map_err(|_| PoolError::Shutdown)?;
        Ok(TaskHandle { result: rx })
    }

    /// Stops accepting new work. Already queued jobs still run.
    pub fn shutdown(&self) {
        if self.sender.lock().take().is_some() {
            tracing::debug!(size = self.size, "worker pool shutting down");
        }
    }

    /// Returns `true` once [`shutdown`](Self::shutdown) has been called.
    pub fn is_shutdown(&self) -> bool {
        self.sender.lock().is_none()
    }

    /// Blocks until every worker has exited or `timeout` elapses.
    ///
    /// Returns `true` if the pool terminated in time. Workers only exit after
    /// [`shutdown`](Self::shutdown), so without it this waits out the whole
    /// timeout and returns `false`.
    pub fn await_termination(&self, timeout: Duration) -> bool {
        let mut live = self.state.live.lock();
        self.state
            .terminated
            .wait_while_for(&mut live, |live| *live > 0, timeout);
        *live == 0
    }

    /// Returns `true` when all workers have exited.
    pub fn is_terminated(&self) -> bool {
        *self.state.live.lock() == 0
    }

    /// Shuts the pool down and drops every job that has not started yet.
    ///
    /// Returns the number of jobs cancelled from the queue. Their handles
    /// report [`TaskError::Cancelled`]. Jobs that are already running are
    /// left to finish.
    pub fn shutdown_now(&self) -> usize {
        self.shutdown();
        self.state.cancelled.store(true, Ordering::Release);
        let cancelled = self.queue.try_iter().count();
        tracing::warn!(cancelled, "worker pool forced shutdown");
        cancelled
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
        for handle in self.workers.get_mut().drain(..) {
            if handle.join().is_err() {
                tracing::warn!("worker thread exited abnormally");
            }
        }
    }
}

impl Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("size", &self.size)
            .field("live", &*self.state.live.lock())
            .field("shutdown", &self.is_shutdown())
            .finish()
    }
}

fn worker_loop(id: usize, jobs: Receiver<Job>, guard: ExitGuard) {
    for job in jobs.iter() {
        if guard.0.cancelled.load(Ordering::Acquire) {
            drop(job);
            continue;
        }
        job();
    }
    tracing::trace!(worker = id, "worker exiting");
}

/// Handle to the result of a task submitted to a [`WorkerPool`].
#[derive(Debug)]
pub struct TaskHandle<R> {
    result: Receiver<thread::Result<R>>,
}

impl<R> TaskHandle<R> {
    /// Blocks until the task finishes and returns its value.
    ///
    /// Returns [`TaskError::Panicked`] if the task panicked and
    /// [`TaskError::Cancelled`] if it was dropped by
    /// [`shutdown_now`](WorkerPool::shutdown_now) before running.
    pub fn join(self) -> Result<R, TaskError> {
        match self.result.recv() {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(payload)) => Err(TaskError::Panicked(panic_message(payload.as_ref()))),
            Err(_) => Err(TaskError::Cancelled),
        }
    }
}

/// Extracts a readable message from a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
