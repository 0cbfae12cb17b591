//! The settled, three-way view of an [`AsyncResult`](crate::AsyncResult).

use crate::{Either, Unhandled};

/// How an `AsyncResult<E, A>` ended.
///
/// Exactly one of these holds once the result has resolved.
///
/// # Example
///
/// ```rust
/// use undertow::{Either, Outcome, Unhandled};
///
/// let ok: Outcome<String, i32> = Outcome::from(Ok(Either::right(3)));
/// assert_eq!(ok, Outcome::Success(3));
///
/// let boom = Unhandled::msg("boom");
/// let crashed: Outcome<String, i32> = Outcome::Unhandled(boom.clone());
/// assert_eq!(crashed.into_result(), Err(boom));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<E, A> {
    /// The computation produced a value.
    Success(A),
    /// The computation produced an expected, typed error.
    Failure(E),
    /// The computation itself failed.
    Unhandled(Unhandled),
}

impl<E, A> Outcome<E, A> {
    /// Returns `true` for `Success`.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Returns `true` for `Failure`.
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    /// Returns `true` for `Unhandled`.
    pub fn is_unhandled(&self) -> bool {
        matches!(self, Outcome::Unhandled(_))
    }

    /// The success value, if any.
    pub fn success(self) -> Option<A> {
        match self {
            Outcome::Success(a) => Some(a),
            _ => None,
        }
    }

    /// The expected error, if any.
    pub fn failure(self) -> Option<E> {
        match self {
            Outcome::Failure(e) => Some(e),
            _ => None,
        }
    }

    /// The unhandled failure, if any.
    pub fn unhandled(self) -> Option<Unhandled> {
        match self {
            Outcome::Unhandled(u) => Some(u),
            _ => None,
        }
    }

    /// Split into the deferred value's two channels: the disjunction it
    /// resolved to, or the failure it raised.
    pub fn into_result(self) -> Result<Either<E, A>, Unhandled> {
        match self {
            Outcome::Success(a) => Ok(Either::Right(a)),
            Outcome::Failure(e) => Ok(Either::Left(e)),
            Outcome::Unhandled(u) => Err(u),
        }
    }
}

impl<E, A> From<Result<Either<E, A>, Unhandled>> for Outcome<E, A> {
    fn from(settled: Result<Either<E, A>, Unhandled>) -> Self {
        match settled {
            Ok(Either::Right(a)) => Outcome::Success(a),
            Ok(Either::Left(e)) => Outcome::Failure(e),
            Err(u) => Outcome::Unhandled(u),
        }
    }
}
