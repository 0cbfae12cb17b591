//! Tracing support for results.
//!
//! This module provides [`AsyncResultTracingExt::instrument`], which settles a
//! result inside a tracing span and records which of the three outcomes it
//! reached. Feature-gated behind `#[cfg(feature = "tracing")]`.

use std::sync::Arc;

use crate::deferred::Deferred;
use crate::{AsyncResult, Either};

/// Extension trait for adding tracing instrumentation to results.
pub trait AsyncResultTracingExt<E, A> {
    /// Settle this result inside `span`.
    ///
    /// The span is entered while the outcome is recorded and while any
    /// continuation that runs inline with the settlement executes, so
    /// downstream combinators on an [`Inline`](crate::executor::Inline)
    /// executor are attributed to it as well.
    ///
    /// # Example
    ///
    /// ```rust
    /// use undertow::instrument::AsyncResultTracingExt;
    /// use undertow::{AsyncResult, Outcome};
    ///
    /// let user = AsyncResult::<String, u32>::pure(7)
    ///     .instrument(tracing::debug_span!("load_user", user_id = 7));
    /// assert_eq!(user.peek(), Some(Outcome::Success(7)));
    /// ```
    fn instrument(self, span: tracing::Span) -> AsyncResult<E, A>;
}

impl<E, A> AsyncResultTracingExt<E, A> for AsyncResult<E, A>
where
    E: Clone + Send + 'static,
    A: Clone + Send + 'static,
{
    fn instrument(self, span: tracing::Span) -> AsyncResult<E, A> {
        let (deferred, completer) = Deferred::pending_shared(Arc::clone(self.deferred.executor()));
        self.deferred.subscribe(move |settled| {
            let _entered = span.enter();
            match &settled {
                Ok(Either::Right(_)) => tracing::debug!("result succeeded"),
                Ok(Either::Left(_)) => tracing::debug!("result failed with expected error"),
                Err(failure) => tracing::warn!(error = %failure, "result failed unhandled"),
            }
            completer.complete(settled);
        });
        AsyncResult::from_deferred(deferred)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Outcome, Unhandled};
    use tracing_test::traced_test;

    #[traced_test]
    #[test]
    fn test_instrument_returns_value() {
        let r = AsyncResult::<String, _>::pure(42).instrument(tracing::info_span!("test_span"));
        assert_eq!(r.peek(), Some(Outcome::Success(42)));
        assert!(logs_contain("result succeeded"));
    }

    #[traced_test]
    #[test]
    fn test_expected_error_is_recorded() {
        let r = AsyncResult::<_, i32>::raise_error("nope").instrument(tracing::info_span!("failing"));
        assert_eq!(r.peek(), Some(Outcome::Failure("nope")));
        assert!(logs_contain("result failed with expected error"));
    }

    #[traced_test]
    #[test]
    fn test_unhandled_failure_is_recorded() {
        let boom = Unhandled::msg("wire cut");
        let r = AsyncResult::<String, i32>::raise_unknown_error(boom.clone())
            .instrument(tracing::info_span!("crashing"));
        assert_eq!(r.peek(), Some(Outcome::Unhandled(boom)));
        assert!(logs_contain("wire cut"));
    }

    #[test]
    fn test_nested_spans_compose() {
        let r = AsyncResult::<String, _>::pure(1)
            .instrument(tracing::debug_span!("inner_op"))
            .flat_map(|x| AsyncResult::pure(x + 1).instrument(tracing::debug_span!("outer_op")));
        assert_eq!(r.peek(), Some(Outcome::Success(2)));
    }
}
