//! Single-assignment deferred values.
//!
//! A [`Deferred<T>`] eventually holds either a `T` or an [`Unhandled`]
//! failure. It is settled at most once through its [`Completer`]; every
//! continuation registered before or after that moment observes the same
//! settlement exactly once, dispatched on the cell's [`Executor`].
//!
//! ```rust
//! use undertow::deferred::Deferred;
//! use undertow::executor::Inline;
//! use std::sync::mpsc;
//!
//! let (deferred, completer) = Deferred::<i32>::pending(Inline);
//! let (tx, rx) = mpsc::channel();
//! deferred.subscribe(move |settled| tx.send(settled).unwrap());
//!
//! assert!(completer.complete(Ok(5)));
//! assert!(!completer.complete(Ok(6)));
//! assert_eq!(rx.recv().unwrap(), Ok(5));
//! ```

use std::fmt;
use std::mem;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::executor::{share, Executor, Inline, SharedExecutor};
use crate::Unhandled;

/// What a deferred value settles to.
pub type Settled<T> = Result<T, Unhandled>;

type Continuation<T> = Box<dyn FnOnce(Settled<T>) + Send + 'static>;

enum State<T> {
    Pending(Vec<Continuation<T>>),
    Settled(Settled<T>),
}

struct Cell<T> {
    state: Mutex<State<T>>,
    executor: SharedExecutor,
}

impl<T> Cell<T> {
    fn lock(&self) -> MutexGuard<'_, State<T>> {
        // Continuations never run under the lock, so a poisoned mutex still
        // holds a consistent state.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Read side of a single-assignment cell.
///
/// Cloning yields another handle to the same cell.
pub struct Deferred<T> {
    cell: Arc<Cell<T>>,
}

/// Write side of a single-assignment cell.
///
/// Clones share the cell; only the first `complete` across all of them wins.
pub struct Completer<T> {
    cell: Arc<Cell<T>>,
}

impl<T> Clone for Deferred<T> {
    fn clone(&self) -> Self {
        Deferred {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<T> Clone for Completer<T> {
    fn clone(&self) -> Self {
        Completer {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<T> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &*self.cell.lock() {
            State::Pending(waiting) => format!("pending ({} waiting)", waiting.len()),
            State::Settled(Ok(_)) => "resolved".to_string(),
            State::Settled(Err(_)) => "failed".to_string(),
        };
        f.debug_struct("Deferred")
            .field("state", &state)
            .field("executor", &self.cell.executor)
            .finish()
    }
}

impl<T> fmt::Debug for Completer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completer").finish_non_exhaustive()
    }
}

impl<T> Deferred<T>
where
    T: Clone + Send + 'static,
{
    /// Create an unresolved cell whose continuations run on `executor`.
    pub fn pending<X: Executor>(executor: X) -> (Self, Completer<T>) {
        Self::pending_shared(share(executor))
    }

    pub(crate) fn pending_shared(executor: SharedExecutor) -> (Self, Completer<T>) {
        let cell = Arc::new(Cell {
            state: Mutex::new(State::Pending(Vec::new())),
            executor,
        });
        (
            Deferred {
                cell: Arc::clone(&cell),
            },
            Completer { cell },
        )
    }

    /// Create a cell that is already settled.
    pub fn settled(settled: Settled<T>) -> Self {
        Deferred {
            cell: Arc::new(Cell {
                state: Mutex::new(State::Settled(settled)),
                executor: share(Inline),
            }),
        }
    }

    /// Create a cell already resolved to `value`.
    pub fn resolved(value: T) -> Self {
        Self::settled(Ok(value))
    }

    /// Create a cell already failed with `failure`.
    pub fn failed(failure: Unhandled) -> Self {
        Self::settled(Err(failure))
    }

    /// Register a continuation without blocking.
    ///
    /// It fires exactly once, on this cell's executor: as soon as the cell
    /// settles, or right away if it already has.
    pub fn subscribe<K>(&self, continuation: K)
    where
        K: FnOnce(Settled<T>) + Send + 'static,
    {
        let settled = {
            let mut state = self.cell.lock();
            match &mut *state {
                State::Pending(waiting) => {
                    waiting.push(Box::new(continuation));
                    return;
                }
                State::Settled(settled) => settled.clone(),
            }
        };
        self.cell
            .executor
            .execute(Box::new(move || continuation(settled)));
    }

    /// Snapshot the settlement, if there is one yet.
    pub fn peek(&self) -> Option<Settled<T>> {
        match &*self.cell.lock() {
            State::Pending(_) => None,
            State::Settled(settled) => Some(settled.clone()),
        }
    }

    /// Whether the cell has settled.
    pub fn is_settled(&self) -> bool {
        matches!(&*self.cell.lock(), State::Settled(_))
    }

    /// The executor continuations are dispatched on.
    pub fn executor(&self) -> &SharedExecutor {
        &self.cell.executor
    }
}

impl<T> Completer<T>
where
    T: Clone + Send + 'static,
{
    /// Settle the cell. Returns `false`, and drops `settled`, if it was
    /// already settled.
    pub fn complete(&self, settled: Settled<T>) -> bool {
        let waiting = {
            let mut state = self.cell.lock();
            match &mut *state {
                State::Settled(_) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!("deferred value already settled; discarding second completion");
                    return false;
                }
                State::Pending(waiting) => {
                    let waiting = mem::take(waiting);
                    *state = State::Settled(settled.clone());
                    waiting
                }
            }
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(
            ok = settled.is_ok(),
            continuations = waiting.len(),
            "deferred value settled"
        );

        for continuation in waiting {
            let settled = settled.clone();
            self.cell
                .executor
                .execute(Box::new(move || continuation(settled)));
        }
        true
    }

    /// Whether the cell has settled, through this or any other completer.
    pub fn is_settled(&self) -> bool {
        matches!(&*self.cell.lock(), State::Settled(_))
    }
}
