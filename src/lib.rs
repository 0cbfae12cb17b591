//! # Undertow
//!
//! > *What you can't see pulling you under is the part worth modelling.*
//!
//! A Rust library for composing asynchronous computations that can end three
//! ways:
//! - **Success**: a value of type `A`
//! - **Expected failure**: a typed, domain error `E` you planned for
//! - **Unhandled failure**: something blew up that nobody planned for
//!
//! [`AsyncResult<E, A>`] keeps the first two in its type signature and the
//! third on a separate channel, so `map`, `flat_map` and `recover` chains
//! stay explicit about what can go wrong without ever mistaking a crash for
//! a domain error.
//!
//! ## Quick Example
//!
//! ```rust
//! use undertow::executor::ThreadPerTask;
//! use undertow::{AsyncResult, Either, Outcome};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum FetchError {
//!     NotFound(u32),
//! }
//!
//! fn fetch_name(id: u32) -> AsyncResult<FetchError, String> {
//!     AsyncResult::async_of(ThreadPerTask, move || match id {
//!         1 => Either::right("ada".to_string()),
//!         _ => Either::left(FetchError::NotFound(id)),
//!     })
//! }
//!
//! # tokio_test::block_on(async {
//! let greeting = fetch_name(1)
//!     .zip(fetch_name(2).recover_with(|_| AsyncResult::pure("guest".to_string())))
//!     .map(|(a, b)| format!("{} and {}", a, b));
//!
//! assert_eq!(greeting.await, Outcome::Success("ada and guest".to_string()));
//! # });
//! ```
//!
//! Scheduling is not this crate's business: every deferred value carries an
//! [`Executor`](executor::Executor) that decides where continuations run.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod deferred;
pub mod either;
pub mod executor;
#[cfg(feature = "tracing")]
pub mod instrument;
pub mod nonempty;
pub mod outcome;
pub mod result;
pub mod testing;
pub mod traverse;
pub mod unhandled;

// Re-exports
pub use either::Either;
pub use nonempty::NonEmptyVec;
pub use outcome::Outcome;
pub use result::{AsyncResult, OutcomeFuture, Resolver};
pub use unhandled::Unhandled;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::executor::{Executor, Inline, ThreadPerTask};
    #[cfg(feature = "tracing")]
    pub use crate::instrument::AsyncResultTracingExt;
    pub use crate::traverse::{ap, first_success_in, fold, reduce, sequence, traverse};
    pub use crate::{AsyncResult, Either, NonEmptyVec, Outcome, Unhandled};
}
