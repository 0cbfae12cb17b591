//! Where continuations run.
//!
//! The crate never spawns threads or drives an event loop on its own. Every
//! deferred value carries an [`Executor`] and hands it each continuation that
//! becomes runnable. Swapping the executor changes *where* callbacks fire
//! without touching any combinator.
//!
//! | Executor | Runs jobs |
//! |----------|-----------|
//! | [`Inline`] | immediately, on the thread that made them runnable |
//! | [`ThreadPerTask`] | on a fresh OS thread each |
//! | [`Tokio`] (feature `async`) | on a tokio runtime's blocking pool |
//! | [`ManualExecutor`](crate::testing::ManualExecutor) | when a test drains its queue |

use std::fmt;
use std::sync::Arc;

/// A unit of work handed to an executor.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Scheduling capability injected into deferred values.
///
/// Implementations must run every job exactly once, eventually.
///
/// # Example
///
/// ```rust
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use undertow::executor::{Executor, Inline, Job};
///
/// #[derive(Debug, Default)]
/// struct Counting {
///     ran: AtomicUsize,
/// }
///
/// impl Executor for Counting {
///     fn execute(&self, job: Job) {
///         self.ran.fetch_add(1, Ordering::SeqCst);
///         Inline.execute(job);
///     }
/// }
///
/// let exec = Arc::new(Counting::default());
/// exec.execute(Box::new(|| {}));
/// assert_eq!(exec.ran.load(Ordering::SeqCst), 1);
/// ```
pub trait Executor: Send + Sync + fmt::Debug + 'static {
    /// Schedule `job` to run.
    fn execute(&self, job: Job);
}

impl<X: Executor + ?Sized> Executor for Arc<X> {
    fn execute(&self, job: Job) {
        (**self).execute(job)
    }
}

impl<X: Executor + ?Sized> Executor for Box<X> {
    fn execute(&self, job: Job) {
        (**self).execute(job)
    }
}

/// A type-erased, shareable executor handle.
pub type SharedExecutor = Arc<dyn Executor>;

pub(crate) fn share<X: Executor>(executor: X) -> SharedExecutor {
    Arc::new(executor)
}

/// Runs each job immediately on the calling thread.
///
/// This is the executor of every already-resolved result, which makes
/// pipelines built purely from `pure`/`raise_error` settle synchronously.
///
/// Continuations run nested inside the settling call: when a pending result
/// settles, a `map`/`flat_map` chain built on it recurses once per link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Inline;

impl Executor for Inline {
    fn execute(&self, job: Job) {
        job()
    }
}

/// Runs each job on its own freshly spawned OS thread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThreadPerTask;

impl Executor for ThreadPerTask {
    fn execute(&self, job: Job) {
        std::thread::spawn(job);
    }
}

/// Runs jobs on a tokio runtime's blocking thread pool.
///
/// Jobs are synchronous closures that may block (for example
/// [`async_of`](crate::AsyncResult::async_of) wrapping a blocking call), so
/// they go through `spawn_blocking` rather than the async worker threads.
#[cfg(feature = "async")]
#[derive(Debug, Clone)]
pub struct Tokio {
    handle: tokio::runtime::Handle,
}

#[cfg(feature = "async")]
impl Tokio {
    /// Use the given runtime handle.
    pub fn new(handle: tokio::runtime::Handle) -> Self {
        Tokio { handle }
    }

    /// Use the runtime the caller is currently running inside, if any.
    pub fn try_current() -> Option<Self> {
        tokio::runtime::Handle::try_current().ok().map(Self::new)
    }

    /// The runtime handle jobs are spawned on.
    pub fn handle(&self) -> &tokio::runtime::Handle {
        &self.handle
    }
}

#[cfg(feature = "async")]
impl Executor for Tokio {
    fn execute(&self, job: Job) {
        drop(self.handle.spawn_blocking(job));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_inline_runs_before_returning() {
        let (tx, rx) = mpsc::channel();
        Inline.execute(Box::new(move || tx.send(1).unwrap()));
        assert_eq!(rx.try_recv(), Ok(1));
    }

    #[test]
    fn test_thread_per_task_runs_off_thread() {
        let (tx, rx) = mpsc::channel();
        let caller = std::thread::current().id();
        ThreadPerTask.execute(Box::new(move || {
            tx.send(std::thread::current().id()).unwrap();
        }));
        let worker = rx.recv().unwrap();
        assert_ne!(worker, caller);
    }

    #[test]
    fn test_shared_handle_delegates() {
        let shared: SharedExecutor = share(Inline);
        let (tx, rx) = mpsc::channel();
        shared.execute(Box::new(move || tx.send("ran").unwrap()));
        assert_eq!(rx.try_recv(), Ok("ran"));
    }

    #[cfg(feature = "async")]
    #[tokio::test]
    async fn test_tokio_executor_runs_job() {
        let exec = Tokio::try_current().expect("inside a runtime");
        let (tx, rx) = tokio::sync::oneshot::channel();
        exec.execute(Box::new(move || {
            let _ = tx.send(7);
        }));
        assert_eq!(rx.await, Ok(7));
    }

    #[cfg(feature = "async")]
    #[test]
    fn test_tokio_try_current_outside_runtime() {
        assert!(Tokio::try_current().is_none());
    }
}
