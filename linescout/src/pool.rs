use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use tracing::{debug, trace, warn};

use crate::errors::{ScanError, ScanResult};

/// A queued unit of work
type Job = Box<dyn FnOnce() + Send + 'static>;

/// Where the pool is in its life.
///
/// The only legal transitions are `Running -> Draining -> Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    /// Accepting and executing tasks
    Running,
    /// No longer accepting tasks; workers finish the queue and exit
    Draining,
    /// All workers have been joined
    Stopped,
}

/// Everything the mutex guards: the task queue, the lifecycle flag, and
/// the counters the completion predicate reads.
struct PoolCore {
    queue: VecDeque<Job>,
    lifecycle: Lifecycle,
    in_flight: usize,
    submitted: u64,
    completed: u64,
}

impl PoolCore {
    fn new() -> Self {
        PoolCore {
            queue: VecDeque::new(),
            lifecycle: Lifecycle::Running,
            in_flight: 0,
            submitted: 0,
            completed: 0,
        }
    }

    fn is_idle(&self) -> bool {
        self.queue.is_empty() && self.in_flight == 0
    }
}

/// State shared between the pool handle and its worker threads
struct Inner {
    core: Mutex<PoolCore>,
    /// Signaled when a task is queued or the pool starts draining
    task_ready: Condvar,
    /// Signaled when the queue is empty and no task is executing
    all_done: Condvar,
}

/// A fixed-size pool of worker threads executing queued tasks in FIFO
/// dispatch order, demonstrating how Rust expresses what .NET hides
/// inside `ThreadPool` and the TPL.
///
/// # Rust Worker Pools vs .NET ThreadPool
///
/// 1. **Lifetime and Ownership**
///    .NET's pool is a process-global singleton with no shutdown story:
///    ```csharp
///    ThreadPool.QueueUserWorkItem(_ => DoWork());
///    // Threads live until the process exits; nothing to dispose
///    ```
///
///    A `WorkerPool` is an ordinary value. Dropping it stops intake,
///    then finishes queued work and joins every thread:
///    ```rust,ignore
///    {
///        let pool = WorkerPool::new(threads)?;
///        pool.submit(|| do_work())?;
///    } // <- drained and joined here
///    ```
///
/// 2. **The Work Queue Is Visible**
///    .NET hides per-core injection queues and work stealing behind
///    `QueueUserWorkItem`. Here the queue is literally a
///    `Mutex<VecDeque<Job>>` paired with a `Condvar`; a worker sleeps on
///    the condition variable until a task or a shutdown request arrives.
///
/// 3. **Waiting for Completion**
///    .NET reaches for `CountdownEvent` or `Task.WhenAll`:
///    ```csharp
///    var countdown = new CountdownEvent(files.Count);
///    // each work item calls countdown.Signal()
///    countdown.Wait();
///    ```
///
///    The pool already knows when it is quiescent, so waiting is a
///    condition-variable predicate over the same mutex that guards the
///    queue, with no caller-side bookkeeping:
///    ```rust,ignore
///    pool.wait_idle(); // queue empty AND nothing mid-execution
///    ```
///
/// 4. **Errors Are Values**
///    Submitting to a disposed .NET resource throws
///    `ObjectDisposedException` at runtime. Submitting to a shut-down
///    `WorkerPool` returns `Err(ScanError::PoolClosed)`, which the
///    caller must consciously handle or propagate with `?`.
///
/// Tasks execute outside the queue lock, so a long-running task never
/// blocks submission or the other workers. The pool does not catch
/// panics: a panicking task takes its worker thread down with it and
/// leaves the pool permanently short-handed, so tasks must be
/// panic-free.
pub struct WorkerPool {
    inner: Arc<Inner>,
    workers: Vec<JoinHandle<()>>,
    threads: NonZeroUsize,
}

impl WorkerPool {
    /// Spawns `threads` named worker threads.
    ///
    /// If the operating system refuses a spawn partway through, the
    /// workers spawned so far are shut down before the error is
    /// returned.
    pub fn new(threads: NonZeroUsize) -> ScanResult<Self> {
        let inner = Arc::new(Inner {
            core: Mutex::new(PoolCore::new()),
            task_ready: Condvar::new(),
            all_done: Condvar::new(),
        });

        let mut workers = Vec::with_capacity(threads.get());
        for id in 0..threads.get() {
            let worker_inner = Arc::clone(&inner);
            let handle = thread::Builder::new()
                .name(format!("linescout-worker-{id}"))
                .spawn(move || worker_loop(id, worker_inner));
            match handle {
                Ok(handle) => workers.push(handle),
                Err(e) => {
                    let mut partial = WorkerPool {
                        inner,
                        workers,
                        threads,
                    };
                    partial.shutdown();
                    return Err(ScanError::ThreadSpawn(e));
                }
            }
        }

        debug!("worker pool started with {} threads", threads);
        Ok(WorkerPool {
            inner,
            workers,
            threads,
        })
    }

    /// Queues a task for execution.
    ///
    /// Tasks are dispatched to workers in submission order. Returns
    /// [`ScanError::PoolClosed`] once the pool has begun shutting down.
    /// Worker threads may call this to enqueue follow-up work.
    pub fn submit<F>(&self, job: F) -> ScanResult<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let mut core = self.inner.core.lock().unwrap();
        if core.lifecycle != Lifecycle::Running {
            return Err(ScanError::PoolClosed);
        }
        core.queue.push_back(Box::new(job));
        core.submitted += 1;
        drop(core);

        self.inner.task_ready.notify_one();
        Ok(())
    }

    /// Blocks until the queue is empty and no task is executing.
    ///
    /// Tasks submitted while this call is blocked, including follow-up
    /// work queued by running tasks, are waited for as well. Returns
    /// immediately if the pool is already idle.
    pub fn wait_idle(&self) {
        let core = self.inner.core.lock().unwrap();
        let _core = self
            .inner
            .all_done
            .wait_while(core, |core| !core.is_idle())
            .unwrap();
    }

    /// Stops intake, then finishes all queued tasks and joins every worker.
    ///
    /// Tasks accepted before this call are guaranteed to execute.
    /// Calling it again after the pool has stopped is a no-op; `Drop`
    /// calls it as well.
    pub fn shutdown(&mut self) {
        {
            let mut core = self.inner.core.lock().unwrap();
            if core.lifecycle != Lifecycle::Running {
                return;
            }
            core.lifecycle = Lifecycle::Draining;
        }
        self.inner.task_ready.notify_all();

        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                warn!("worker thread panicked before shutdown");
            }
        }

        let mut core = self.inner.core.lock().unwrap();
        core.lifecycle = Lifecycle::Stopped;
        debug!(
            "worker pool shut down ({} submitted, {} completed)",
            core.submitted, core.completed
        );
    }

    /// Number of worker threads the pool was built with
    pub fn thread_count(&self) -> NonZeroUsize {
        self.threads
    }

    /// Total tasks accepted so far
    pub fn submitted(&self) -> u64 {
        self.inner.core.lock().unwrap().submitted
    }

    /// Total tasks that have finished executing
    pub fn completed(&self) -> u64 {
        self.inner.core.lock().unwrap().completed
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn worker_loop(id: usize, inner: Arc<Inner>) {
    trace!("worker {id} started");
    loop {
        let job = {
            let mut core = inner.core.lock().unwrap();
            loop {
                // Drain before honoring a shutdown request
                if let Some(job) = core.queue.pop_front() {
                    core.in_flight += 1;
                    break Some(job);
                }
                if core.lifecycle != Lifecycle::Running {
                    break None;
                }
                core = inner.task_ready.wait(core).unwrap();
            }
        };

        let Some(job) = job else {
            break;
        };

        // Lock released; the task must not stall other workers
        job();

        let mut core = inner.core.lock().unwrap();
        core.in_flight -= 1;
        core.completed += 1;
        if core.is_idle() {
            inner.all_done.notify_all();
        }
    }
    trace!("worker {id} exiting");
}
