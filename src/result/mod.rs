//! Deferred results with a typed error channel and an unhandled-failure channel.
//!
//! An [`AsyncResult<E, A>`] wraps one [`Deferred`] value that eventually
//! resolves to an [`Either<E, A>`] or fails with an [`Unhandled`]. That gives
//! three possible outcomes:
//!
//! | Outcome | Deferred value | Seen by |
//! |---------|----------------|---------|
//! | success `A` | resolves `Right(a)` | `map`, `flat_map`, `zip` |
//! | expected error `E` | resolves `Left(e)` | `recover`, `recover_with` |
//! | unhandled failure | fails | only terminal observers |
//!
//! Every combinator registers a continuation and returns a new result
//! immediately; nothing here blocks.
//!
//! # Example
//!
//! ```rust
//! use undertow::{AsyncResult, Outcome};
//!
//! # tokio_test::block_on(async {
//! let port = AsyncResult::<String, &str>::pure("8080")
//!     .flat_map(|raw| match raw.parse::<u16>() {
//!         Ok(port) => AsyncResult::pure(port),
//!         Err(e) => AsyncResult::raise_error(e.to_string()),
//!     })
//!     .map(|port| port + 1);
//!
//! assert_eq!(port.await, Outcome::Success(8081));
//! # });
//! ```

mod constructors;
mod future;

pub use constructors::Resolver;
pub use future::OutcomeFuture;

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::deferred::{Deferred, Settled};
use crate::executor::Executor;
use crate::{Either, Outcome, Unhandled};

/// A deferred computation that ends in success, an expected error, or an
/// unhandled failure.
///
/// Cloning is cheap; clones observe the same resolution.
pub struct AsyncResult<E, A> {
    pub(crate) deferred: Deferred<Either<E, A>>,
}

impl<E, A> Clone for AsyncResult<E, A> {
    fn clone(&self) -> Self {
        AsyncResult {
            deferred: self.deferred.clone(),
        }
    }
}

impl<E, A> fmt::Debug for AsyncResult<E, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncResult")
            .field("deferred", &self.deferred)
            .finish()
    }
}

/// Run `f`, turning a panic into an unhandled failure.
pub(crate) fn guard<T>(f: impl FnOnce() -> T) -> Settled<T> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(Unhandled::from_panic)
}

impl<E, A> AsyncResult<E, A>
where
    E: Clone + Send + 'static,
    A: Clone + Send + 'static,
{
    pub(crate) fn from_deferred(deferred: Deferred<Either<E, A>>) -> Self {
        AsyncResult { deferred }
    }

    /// Derive a result from this one's settlement.
    fn transform<E2, B, F>(self, f: F) -> AsyncResult<E2, B>
    where
        E2: Clone + Send + 'static,
        B: Clone + Send + 'static,
        F: FnOnce(Settled<Either<E, A>>) -> Settled<Either<E2, B>> + Send + 'static,
    {
        let (deferred, completer) = Deferred::pending_shared(Arc::clone(self.deferred.executor()));
        self.deferred.subscribe(move |settled| {
            completer.complete(f(settled));
        });
        AsyncResult { deferred }
    }

    /// Replace this result with the one `f` builds from its settlement.
    fn chain<E2, B, F>(self, f: F) -> AsyncResult<E2, B>
    where
        E2: Clone + Send + 'static,
        B: Clone + Send + 'static,
        F: FnOnce(Settled<Either<E, A>>) -> AsyncResult<E2, B> + Send + 'static,
    {
        let (deferred, completer) = Deferred::pending_shared(Arc::clone(self.deferred.executor()));
        self.deferred.subscribe(move |settled| {
            let next = guard(|| f(settled)).unwrap_or_else(AsyncResult::raise_unknown_error);
            next.deferred.subscribe(move |settled| {
                completer.complete(settled);
            });
        });
        AsyncResult { deferred }
    }

    /// Transform the success value.
    ///
    /// Expected errors and unhandled failures pass through untouched, and
    /// `f` is not called for them. A panic inside `f` becomes an unhandled
    /// failure.
    ///
    /// # Example
    ///
    /// ```rust
    /// use undertow::{AsyncResult, Outcome};
    ///
    /// # tokio_test::block_on(async {
    /// let len = AsyncResult::<(), _>::pure("hello").map(str::len);
    /// assert_eq!(len.await, Outcome::Success(5));
    /// # });
    /// ```
    pub fn map<B, F>(self, f: F) -> AsyncResult<E, B>
    where
        B: Clone + Send + 'static,
        F: FnOnce(A) -> B + Send + 'static,
    {
        self.transform(move |settled| match settled {
            Ok(Either::Right(a)) => guard(|| Either::Right(f(a))),
            Ok(Either::Left(e)) => Ok(Either::Left(e)),
            Err(failure) => Err(failure),
        })
    }

    /// Chain a dependent computation on the success value.
    ///
    /// On success the chain continues with `f(a)`. On an expected error or
    /// an unhandled failure `f` is never called and the same error or
    /// failure is carried forward.
    ///
    /// # Example
    ///
    /// ```rust
    /// use undertow::{AsyncResult, Outcome};
    ///
    /// fn lookup(id: u32) -> AsyncResult<String, &'static str> {
    ///     match id {
    ///         1 => AsyncResult::pure("ada"),
    ///         _ => AsyncResult::raise_error(format!("no user {}", id)),
    ///     }
    /// }
    ///
    /// # tokio_test::block_on(async {
    /// assert_eq!(AsyncResult::pure(1).flat_map(lookup).await, Outcome::Success("ada"));
    /// assert_eq!(
    ///     AsyncResult::pure(2).flat_map(lookup).await,
    ///     Outcome::Failure("no user 2".to_string())
    /// );
    /// # });
    /// ```
    pub fn flat_map<B, F>(self, f: F) -> AsyncResult<E, B>
    where
        B: Clone + Send + 'static,
        F: FnOnce(A) -> AsyncResult<E, B> + Send + 'static,
    {
        self.chain(move |settled| match settled {
            Ok(Either::Right(a)) => f(a),
            Ok(Either::Left(e)) => AsyncResult::raise_error(e),
            Err(failure) => AsyncResult::raise_unknown_error(failure),
        })
    }

    /// Exchange the success and expected-error roles.
    ///
    /// Unhandled failures stay unhandled.
    pub fn swap(self) -> AsyncResult<A, E> {
        self.transform(|settled| settled.map(Either::swap))
    }

    /// Transform the expected error.
    ///
    /// Derived as `swap().map(f).swap()`; successes pass through untouched.
    ///
    /// # Example
    ///
    /// ```rust
    /// use undertow::{AsyncResult, Outcome};
    ///
    /// # tokio_test::block_on(async {
    /// let coded = AsyncResult::<_, i32>::raise_error("timeout").recover(|e| e.len());
    /// assert_eq!(coded.await, Outcome::Failure(7));
    /// # });
    /// ```
    pub fn recover<EE, F>(self, f: F) -> AsyncResult<EE, A>
    where
        EE: Clone + Send + 'static,
        F: FnOnce(E) -> EE + Send + 'static,
    {
        self.swap().map(f).swap()
    }

    /// Alias for [`recover`](AsyncResult::recover).
    pub fn map_err<EE, F>(self, f: F) -> AsyncResult<EE, A>
    where
        EE: Clone + Send + 'static,
        F: FnOnce(E) -> EE + Send + 'static,
    {
        self.recover(f)
    }

    /// Replace an expected error with the result `f` builds from it.
    ///
    /// Derived as `swap().flat_map(|e| f(e).swap()).swap()`. Successes pass
    /// through re-typed; unhandled failures are not intercepted.
    ///
    /// # Example
    ///
    /// ```rust
    /// use undertow::{AsyncResult, Outcome};
    ///
    /// # tokio_test::block_on(async {
    /// let cached = AsyncResult::<&str, i32>::raise_error("cache miss")
    ///     .recover_with(|_| AsyncResult::<(), _>::pure(42));
    /// assert_eq!(cached.await, Outcome::Success(42));
    /// # });
    /// ```
    pub fn recover_with<EE, F>(self, f: F) -> AsyncResult<EE, A>
    where
        EE: Clone + Send + 'static,
        F: FnOnce(E) -> AsyncResult<EE, A> + Send + 'static,
    {
        self.swap().flat_map(move |e| f(e).swap()).swap()
    }

    /// Pair this result's success with `other`'s.
    ///
    /// Binds left to right: `other` is consulted only once `self` has
    /// succeeded, so an error or failure on the left always wins, whichever
    /// side finishes first.
    ///
    /// # Example
    ///
    /// ```rust
    /// use undertow::{AsyncResult, Outcome};
    ///
    /// # tokio_test::block_on(async {
    /// let both = AsyncResult::<String, _>::pure(1).zip(AsyncResult::pure('a'));
    /// assert_eq!(both.await, Outcome::Success((1, 'a')));
    /// # });
    /// ```
    pub fn zip<B>(self, other: AsyncResult<E, B>) -> AsyncResult<E, (A, B)>
    where
        B: Clone + Send + 'static,
    {
        self.flat_map(move |a| other.map(move |b| (a, b)))
    }

    /// [`zip`](AsyncResult::zip) followed by `map`.
    pub fn zip_with<B, C, F>(self, other: AsyncResult<E, B>, f: F) -> AsyncResult<E, C>
    where
        B: Clone + Send + 'static,
        C: Clone + Send + 'static,
        F: FnOnce(A, B) -> C + Send + 'static,
    {
        self.zip(other).map(move |(a, b)| f(a, b))
    }

    /// Move continuation dispatch for derived results onto `executor`.
    pub fn dispatch_on<X: Executor>(self, executor: X) -> Self {
        let (deferred, completer) = Deferred::pending(executor);
        self.deferred.subscribe(move |settled| {
            completer.complete(settled);
        });
        AsyncResult { deferred }
    }

    /// Register the terminal callbacks.
    ///
    /// Exactly one of them fires, exactly once, when the result resolves
    /// (immediately if it already has). Registration never blocks; the
    /// callback runs on the underlying deferred value's executor.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::sync::mpsc;
    /// use undertow::AsyncResult;
    ///
    /// let (tx, rx) = mpsc::channel();
    /// let (ok, err, crash) = (tx.clone(), tx.clone(), tx);
    /// AsyncResult::<String, i32>::raise_error("denied".to_string()).on_complete(
    ///     move |n| ok.send(format!("ok {}", n)).unwrap(),
    ///     move |e| err.send(format!("error {}", e)).unwrap(),
    ///     move |u| crash.send(format!("crash {}", u)).unwrap(),
    /// );
    /// assert_eq!(rx.recv().unwrap(), "error denied");
    /// ```
    pub fn on_complete<S, F, U>(&self, on_success: S, on_error: F, on_unhandled: U)
    where
        S: FnOnce(A) + Send + 'static,
        F: FnOnce(E) + Send + 'static,
        U: FnOnce(Unhandled) + Send + 'static,
    {
        self.deferred.subscribe(move |settled| match settled {
            Ok(Either::Right(a)) => on_success(a),
            Ok(Either::Left(e)) => on_error(e),
            Err(failure) => on_unhandled(failure),
        });
    }

    /// Register a single terminal callback receiving the whole [`Outcome`].
    pub fn observe<K>(&self, callback: K)
    where
        K: FnOnce(Outcome<E, A>) + Send + 'static,
    {
        self.deferred
            .subscribe(move |settled| callback(Outcome::from(settled)));
    }

    /// Snapshot the outcome without waiting, if the result has resolved.
    pub fn peek(&self) -> Option<Outcome<E, A>> {
        self.deferred.peek().map(Outcome::from)
    }

    /// Whether the result has resolved.
    pub fn is_resolved(&self) -> bool {
        self.deferred.is_settled()
    }
}
