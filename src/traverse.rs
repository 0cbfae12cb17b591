//! Collection operations over [`AsyncResult`]s.
//!
//! - **`sequence`**: `Vec<AsyncResult<E, A>>` → `AsyncResult<E, Vec<A>>`
//! - **`traverse`**: map each item to a result, then `sequence`
//! - **`fold`** / **`reduce`**: left fold over results in order
//! - **`first_success_in`**: try candidates in order until one succeeds
//! - **`ap`**: apply a deferred function to a deferred argument
//!
//! Everything here walks its input in order and stops at the first expected
//! error or unhandled failure. Collected values keep input order, never
//! completion order.
//!
//! The walks are iterative: elements that have already resolved are consumed
//! in a loop, and only a still-pending element costs a continuation. Stack
//! depth therefore stays flat however long the input is.
//!
//! # Example
//!
//! ```
//! use undertow::traverse::{fold, sequence};
//! use undertow::{AsyncResult, Outcome};
//!
//! let results = vec![
//!     AsyncResult::<String, _>::pure(1),
//!     AsyncResult::pure(2),
//!     AsyncResult::pure(3),
//! ];
//! assert_eq!(sequence(results.clone()).peek(), Some(Outcome::Success(vec![1, 2, 3])));
//! assert_eq!(fold(results, 10, |acc, n| acc + n).peek(), Some(Outcome::Success(16)));
//! ```

use crate::deferred::{Completer, Deferred, Settled};
use crate::executor::Inline;
use crate::result::guard;
use crate::{AsyncResult, Either, NonEmptyVec};

/// Apply a deferred function to a deferred argument.
///
/// Defined as `ff.zip(fa)` followed by the application, so the function's
/// error or failure takes priority over the argument's.
///
/// # Example
///
/// ```
/// use undertow::traverse::ap;
/// use undertow::{AsyncResult, Outcome};
///
/// let double = AsyncResult::<String, fn(i32) -> i32>::pure(|x| x * 2);
/// assert_eq!(ap(double, AsyncResult::pure(21)).peek(), Some(Outcome::Success(42)));
/// ```
pub fn ap<E, A, B, F>(ff: AsyncResult<E, F>, fa: AsyncResult<E, A>) -> AsyncResult<E, B>
where
    E: Clone + Send + 'static,
    A: Clone + Send + 'static,
    B: Clone + Send + 'static,
    F: FnOnce(A) -> B + Clone + Send + 'static,
{
    ff.zip(fa).map(|(f, a)| f(a))
}

/// Left fold over results, in order.
///
/// `f` is applied to each success as it is reached; the first expected
/// error or unhandled failure becomes the outcome and `f` is not applied to
/// anything after it.
///
/// # Example
///
/// ```
/// use undertow::traverse::fold;
/// use undertow::{AsyncResult, Outcome};
///
/// let results = vec![
///     AsyncResult::pure(1),
///     AsyncResult::raise_error("x"),
///     AsyncResult::pure(2),
/// ];
/// assert_eq!(fold(results, 0, |acc, n| acc + n).peek(), Some(Outcome::Failure("x")));
/// ```
pub fn fold<E, A, B, I, F>(results: I, zero: B, f: F) -> AsyncResult<E, B>
where
    E: Clone + Send + 'static,
    A: Clone + Send + 'static,
    B: Clone + Send + 'static,
    I: IntoIterator<Item = AsyncResult<E, A>>,
    I::IntoIter: Send + 'static,
    F: FnMut(B, A) -> B + Send + 'static,
{
    let (deferred, completer) = Deferred::pending(Inline);
    Fold {
        results: results.into_iter(),
        acc: zero,
        f,
        completer,
    }
    .run();
    AsyncResult::from_deferred(deferred)
}

/// [`fold`] seeded with the first element's own success value.
///
/// # Example
///
/// ```
/// use undertow::traverse::reduce;
/// use undertow::{AsyncResult, NonEmptyVec, Outcome};
///
/// let results = NonEmptyVec::of(
///     AsyncResult::<String, u32>::pure(3),
///     [AsyncResult::pure(4), AsyncResult::pure(5)],
/// );
/// let widest = reduce(results, |acc: u64, n| acc.max(n as u64));
/// assert_eq!(widest.peek(), Some(Outcome::Success(5)));
/// ```
pub fn reduce<E, A, B, F>(results: NonEmptyVec<AsyncResult<E, A>>, f: F) -> AsyncResult<E, B>
where
    E: Clone + Send + 'static,
    A: Clone + Send + Into<B> + 'static,
    B: Clone + Send + 'static,
    F: FnMut(B, A) -> B + Send + 'static,
{
    let (head, tail) = results.into_parts();
    head.flat_map(move |first| fold(tail, first.into(), f))
}

/// Turn a collection of results into a result of a collection.
///
/// Values are collected in input order.
pub fn sequence<E, A, I>(results: I) -> AsyncResult<E, Vec<A>>
where
    E: Clone + Send + 'static,
    A: Clone + Send + 'static,
    I: IntoIterator<Item = AsyncResult<E, A>>,
    I::IntoIter: Send + 'static,
{
    fold(results, Vec::new(), |mut acc, a| {
        acc.push(a);
        acc
    })
}

/// Apply `f` to every item and [`sequence`] the results.
///
/// `f` runs eagerly on every item, so the underlying computations may start
/// (and finish) in any order; the collected values still follow input order.
/// A panic inside `f` stops further calls and becomes the unhandled failure
/// at that position.
///
/// # Example
///
/// ```
/// use undertow::traverse::traverse;
/// use undertow::{AsyncResult, Outcome};
///
/// fn parse(s: &str) -> AsyncResult<String, i32> {
///     AsyncResult::from_result(s.parse().map_err(|_| format!("bad number: {}", s)))
/// }
///
/// assert_eq!(traverse(["1", "2"], parse).peek(), Some(Outcome::Success(vec![1, 2])));
/// assert_eq!(
///     traverse(["1", "x", "y"], parse).peek(),
///     Some(Outcome::Failure("bad number: x".to_string()))
/// );
/// ```
pub fn traverse<T, E, B, I, F>(items: I, mut f: F) -> AsyncResult<E, Vec<B>>
where
    E: Clone + Send + 'static,
    B: Clone + Send + 'static,
    I: IntoIterator<Item = T>,
    F: FnMut(T) -> AsyncResult<E, B>,
{
    let mut results = Vec::new();
    for item in items {
        match guard(|| f(item)) {
            Ok(result) => results.push(result),
            Err(failure) => {
                results.push(AsyncResult::raise_unknown_error(failure));
                break;
            }
        }
    }
    sequence(results)
}

/// Try `f` on each item in order until one succeeds.
///
/// The search starts from `acc` and each step is
/// `acc.recover_with(|_| f(item))`:
///
/// - An empty `items` yields `acc` unchanged.
/// - A success (in `acc` or any attempt) wins; no further items are tried.
/// - An expected error moves on to the next item; when the items run out the
///   last expected error is the outcome.
/// - An unhandled failure (in `acc` or any attempt) stops the search at
///   once; remaining items are not tried.
///
/// # Example
///
/// ```
/// use undertow::traverse::first_success_in;
/// use undertow::{AsyncResult, Outcome};
///
/// let mirrors = vec!["eu", "us", "ap"];
/// let fetched = first_success_in(mirrors, AsyncResult::raise_error("no mirrors".to_string()), |m| {
///     if m == "us" {
///         AsyncResult::pure(format!("payload from {}", m))
///     } else {
///         AsyncResult::raise_error(format!("{} unreachable", m))
///     }
/// });
/// assert_eq!(fetched.peek(), Some(Outcome::Success("payload from us".to_string())));
/// ```
pub fn first_success_in<T, E, A, I, F>(items: I, acc: AsyncResult<E, A>, f: F) -> AsyncResult<E, A>
where
    T: Send + 'static,
    E: Clone + Send + 'static,
    A: Clone + Send + 'static,
    I: IntoIterator<Item = T>,
    I::IntoIter: Send + 'static,
    F: FnMut(T) -> AsyncResult<E, A> + Send + 'static,
{
    let mut items = items.into_iter().peekable();
    if items.peek().is_none() {
        return acc;
    }

    let (deferred, completer) = Deferred::pending(Inline);
    FirstSuccess {
        items,
        f,
        completer,
    }
    .run(acc);
    AsyncResult::from_deferred(deferred)
}

struct Fold<I, B, F, E> {
    results: I,
    acc: B,
    f: F,
    completer: Completer<Either<E, B>>,
}

impl<I, E, A, B, F> Fold<I, B, F, E>
where
    I: Iterator<Item = AsyncResult<E, A>> + Send + 'static,
    E: Clone + Send + 'static,
    A: Clone + Send + 'static,
    B: Clone + Send + 'static,
    F: FnMut(B, A) -> B + Send + 'static,
{
    fn run(mut self) {
        loop {
            let Some(next) = self.results.next() else {
                self.completer.complete(Ok(Either::Right(self.acc)));
                return;
            };
            match next.deferred.peek() {
                Some(settled) => match self.absorb(settled) {
                    Some(fold) => self = fold,
                    None => return,
                },
                None => {
                    next.deferred.subscribe(move |settled| {
                        if let Some(fold) = self.absorb(settled) {
                            fold.run();
                        }
                    });
                    return;
                }
            }
        }
    }

    /// Fold one settlement in; `None` once the outcome is decided.
    fn absorb(self, settled: Settled<Either<E, A>>) -> Option<Self> {
        let Fold {
            results,
            acc,
            mut f,
            completer,
        } = self;
        let decided = match settled {
            Ok(Either::Right(a)) => match guard(|| f(acc, a)) {
                Ok(acc) => {
                    return Some(Fold {
                        results,
                        acc,
                        f,
                        completer,
                    })
                }
                Err(failure) => Err(failure),
            },
            Ok(Either::Left(e)) => Ok(Either::Left(e)),
            Err(failure) => Err(failure),
        };
        completer.complete(decided);
        None
    }
}

struct FirstSuccess<I, F, E, A> {
    items: I,
    f: F,
    completer: Completer<Either<E, A>>,
}

impl<I, T, E, A, F> FirstSuccess<I, F, E, A>
where
    I: Iterator<Item = T> + Send + 'static,
    T: Send + 'static,
    E: Clone + Send + 'static,
    A: Clone + Send + 'static,
    F: FnMut(T) -> AsyncResult<E, A> + Send + 'static,
{
    fn attempt(&mut self, item: T) -> AsyncResult<E, A> {
        let f = &mut self.f;
        guard(|| f(item)).unwrap_or_else(AsyncResult::raise_unknown_error)
    }

    fn run(mut self, mut attempt: AsyncResult<E, A>) {
        loop {
            let settled = match attempt.deferred.peek() {
                Some(settled) => settled,
                None => {
                    attempt.deferred.subscribe(move |settled| {
                        if let Some((search, next)) = self.advance(settled) {
                            search.run(next);
                        }
                    });
                    return;
                }
            };
            match self.advance(settled) {
                Some((search, next)) => {
                    self = search;
                    attempt = next;
                }
                None => return,
            }
        }
    }

    /// Settle the search or produce the next attempt.
    fn advance(mut self, settled: Settled<Either<E, A>>) -> Option<(Self, AsyncResult<E, A>)> {
        match settled {
            Ok(Either::Left(e)) => match self.items.next() {
                Some(item) => {
                    let next = self.attempt(item);
                    Some((self, next))
                }
                None => {
                    self.completer.complete(Ok(Either::Left(e)));
                    None
                }
            },
            decided => {
                self.completer.complete(decided);
                None
            }
        }
    }
}
