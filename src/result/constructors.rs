//! Ways to build an [`AsyncResult`].

use std::fmt;

use super::{guard, AsyncResult};
use crate::deferred::{Completer, Deferred};
use crate::executor::Executor;
use crate::{Either, Unhandled};

impl<E, A> AsyncResult<E, A>
where
    E: Clone + Send + 'static,
    A: Clone + Send + 'static,
{
    /// An already-resolved success.
    ///
    /// # Example
    ///
    /// ```rust
    /// use undertow::{AsyncResult, Outcome};
    ///
    /// let r = AsyncResult::<String, _>::pure(3);
    /// assert_eq!(r.peek(), Some(Outcome::Success(3)));
    /// ```
    pub fn pure(value: A) -> Self {
        Self::from_either(Either::Right(value))
    }

    /// An already-resolved result holding `either`.
    pub fn from_either(either: Either<E, A>) -> Self {
        Self::from_deferred(Deferred::resolved(either))
    }

    /// An already-resolved result from a standard `Result`.
    pub fn from_result(result: Result<A, E>) -> Self {
        Self::from_either(Either::from(result))
    }

    /// An already-resolved expected error.
    pub fn raise_error(error: E) -> Self {
        Self::from_either(Either::Left(error))
    }

    /// An already-failed result.
    pub fn raise_unknown_error(failure: Unhandled) -> Self {
        Self::from_deferred(Deferred::failed(failure))
    }

    /// Run `f` on `executor` and capture what it produces.
    ///
    /// A returned `Either` becomes the result; a panic becomes an unhandled
    /// failure.
    ///
    /// # Example
    ///
    /// ```rust
    /// use undertow::executor::ThreadPerTask;
    /// use undertow::{AsyncResult, Either, Outcome};
    ///
    /// # tokio_test::block_on(async {
    /// let read = AsyncResult::<String, u64>::async_of(ThreadPerTask, || Either::right(4096));
    /// assert_eq!(read.await, Outcome::Success(4096));
    ///
    /// let crashed = AsyncResult::<String, u64>::async_of(ThreadPerTask, || panic!("disk gone"));
    /// assert!(crashed.await.is_unhandled());
    /// # });
    /// ```
    pub fn async_of<X, F>(executor: X, f: F) -> Self
    where
        X: Executor,
        F: FnOnce() -> Either<E, A> + Send + 'static,
    {
        let (deferred, completer) = Deferred::pending(executor);
        deferred.executor().execute(Box::new(move || {
            completer.complete(guard(f));
        }));
        Self::from_deferred(deferred)
    }

    /// An unresolved result plus the [`Resolver`] that settles it.
    ///
    /// Bridges callback-style producers into the result algebra.
    ///
    /// # Example
    ///
    /// ```rust
    /// use undertow::executor::Inline;
    /// use undertow::{AsyncResult, Outcome};
    ///
    /// let (result, resolver) = AsyncResult::<String, u8>::pending(Inline);
    /// assert!(!result.is_resolved());
    ///
    /// resolver.succeed(200);
    /// assert_eq!(result.peek(), Some(Outcome::Success(200)));
    /// ```
    pub fn pending<X: Executor>(executor: X) -> (Self, Resolver<E, A>) {
        let (deferred, completer) = Deferred::pending(executor);
        (Self::from_deferred(deferred), Resolver { completer })
    }

    /// Drive `future` on a tokio runtime and capture what it produces.
    ///
    /// Continuations of the returned result run on the runtime's blocking
    /// pool. A panic inside the future becomes an unhandled failure.
    #[cfg(feature = "async")]
    pub fn from_future<Fut>(handle: &tokio::runtime::Handle, future: Fut) -> Self
    where
        Fut: std::future::Future<Output = Either<E, A>> + Send + 'static,
    {
        use futures::FutureExt;
        use std::panic::AssertUnwindSafe;

        let (result, resolver) = Self::pending(crate::executor::Tokio::new(handle.clone()));
        drop(handle.spawn(async move {
            let settled = AssertUnwindSafe(future)
                .catch_unwind()
                .await
                .map_err(Unhandled::from_panic);
            resolver.completer.complete(settled);
        }));
        result
    }
}

/// Write side of a [`pending`](AsyncResult::pending) result.
///
/// Only the first settlement counts; later calls return `false`.
pub struct Resolver<E, A> {
    completer: Completer<Either<E, A>>,
}

impl<E, A> Clone for Resolver<E, A> {
    fn clone(&self) -> Self {
        Resolver {
            completer: self.completer.clone(),
        }
    }
}

impl<E, A> fmt::Debug for Resolver<E, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver").finish_non_exhaustive()
    }
}

impl<E, A> Resolver<E, A>
where
    E: Clone + Send + 'static,
    A: Clone + Send + 'static,
{
    /// Resolve with a success.
    pub fn succeed(&self, value: A) -> bool {
        self.settle(Either::Right(value))
    }

    /// Resolve with an expected error.
    pub fn fail(&self, error: E) -> bool {
        self.settle(Either::Left(error))
    }

    /// Resolve with a disjunction.
    pub fn settle(&self, either: Either<E, A>) -> bool {
        self.completer.complete(Ok(either))
    }

    /// Fail with an unhandled failure.
    pub fn raise(&self, failure: Unhandled) -> bool {
        self.completer.complete(Err(failure))
    }

    /// Whether the result has already been settled.
    pub fn is_settled(&self) -> bool {
        self.completer.is_settled()
    }
}
