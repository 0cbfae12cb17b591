//! Awaiting an [`AsyncResult`] from async code.

use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::oneshot;
use futures::FutureExt;

use super::AsyncResult;
use crate::{Outcome, Unhandled};

/// Future returned by awaiting an [`AsyncResult`].
///
/// Resolves to the result's [`Outcome`]. If the result is dropped without
/// ever resolving (every producer gone), the future resolves to an
/// unhandled failure instead of hanging forever.
#[derive(Debug)]
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct OutcomeFuture<E, A> {
    rx: oneshot::Receiver<Outcome<E, A>>,
}

impl<E, A> Future for OutcomeFuture<E, A> {
    type Output = Outcome<E, A>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.rx.poll_unpin(cx).map(|received| {
            received.unwrap_or_else(|_| {
                Outcome::Unhandled(Unhandled::msg("result abandoned before resolving"))
            })
        })
    }
}

impl<E, A> IntoFuture for AsyncResult<E, A>
where
    E: Clone + Send + 'static,
    A: Clone + Send + 'static,
{
    type Output = Outcome<E, A>;
    type IntoFuture = OutcomeFuture<E, A>;

    fn into_future(self) -> Self::IntoFuture {
        let (tx, rx) = oneshot::channel();
        self.observe(move |outcome| {
            // The receiver may already be gone; nobody is waiting then.
            let _ = tx.send(outcome);
        });
        OutcomeFuture { rx }
    }
}
