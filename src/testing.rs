//! Testing utilities for code built on `AsyncResult`
//!
//! This module provides a deterministic executor, assertion macros over
//! [`Outcome`](crate::Outcome), and (with the `proptest` feature) `Arbitrary`
//! implementations for the crate's data types.
//!
//! # Examples
//!
//! ## ManualExecutor
//!
//! ```rust
//! use undertow::testing::ManualExecutor;
//! use undertow::{AsyncResult, Outcome};
//!
//! let exec = ManualExecutor::new();
//! let (result, resolver) = AsyncResult::<String, i32>::pending(exec.clone());
//! let doubled = result.map(|x| x * 2);
//!
//! resolver.succeed(21);
//! assert!(!doubled.is_resolved());
//!
//! exec.run_until_idle();
//! assert_eq!(doubled.peek(), Some(Outcome::Success(42)));
//! ```
//!
//! ## Assertion Macros
//!
//! ```rust
//! use undertow::{assert_failure, assert_success, AsyncResult};
//!
//! assert_success!(AsyncResult::<String, _>::pure(1).peek().unwrap());
//! assert_failure!(AsyncResult::<_, i32>::raise_error("bad").peek().unwrap());
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::executor::{Executor, Job};

/// An executor that queues jobs until the test runs them.
///
/// Clones share one queue. Jobs run on the thread that drains the queue, in
/// the order they were scheduled, which makes completion order explicit in
/// tests that care about it.
#[derive(Clone, Default)]
pub struct ManualExecutor {
    queue: Arc<Mutex<VecDeque<Job>>>,
}

impl ManualExecutor {
    /// Create an executor with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    fn queue(&self) -> MutexGuard<'_, VecDeque<Job>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of jobs waiting to run.
    pub fn pending_jobs(&self) -> usize {
        self.queue().len()
    }

    /// Run the oldest queued job. Returns `false` if the queue was empty.
    pub fn run_next(&self) -> bool {
        let job = self.queue().pop_front();
        match job {
            Some(job) => {
                job();
                true
            }
            None => false,
        }
    }

    /// Run jobs, including any they schedule, until the queue is empty.
    ///
    /// Returns how many jobs ran.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        while self.run_next() {
            ran += 1;
        }
        ran
    }
}

impl fmt::Debug for ManualExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualExecutor")
            .field("pending_jobs", &self.pending_jobs())
            .finish()
    }
}

impl Executor for ManualExecutor {
    fn execute(&self, job: Job) {
        self.queue().push_back(job);
    }
}

/// Assert that an outcome is a success.
///
/// This macro will panic if the outcome is a `Failure` or `Unhandled`.
///
/// # Example
///
/// ```rust
/// use undertow::{assert_success, Outcome};
///
/// assert_success!(Outcome::<String, _>::Success(42));
/// ```
#[macro_export]
macro_rules! assert_success {
    ($outcome:expr) => {
        match $outcome {
            $crate::Outcome::Success(_) => {}
            $crate::Outcome::Failure(e) => {
                panic!("Expected Success, got Failure: {:?}", e);
            }
            $crate::Outcome::Unhandled(u) => {
                panic!("Expected Success, got Unhandled: {}", u);
            }
        }
    };
    ($outcome:expr, $expected:expr) => {
        match $outcome {
            $crate::Outcome::Success(v) => assert_eq!(v, $expected),
            $crate::Outcome::Failure(e) => {
                panic!("Expected Success({:?}), got Failure: {:?}", $expected, e);
            }
            $crate::Outcome::Unhandled(u) => {
                panic!("Expected Success({:?}), got Unhandled: {}", $expected, u);
            }
        }
    };
}

/// Assert that an outcome is an expected failure, optionally with a given error.
///
/// # Example
///
/// ```rust
/// use undertow::{assert_failure, Outcome};
///
/// assert_failure!(Outcome::<_, i32>::Failure("denied"));
/// assert_failure!(Outcome::<_, i32>::Failure("denied"), "denied");
/// ```
#[macro_export]
macro_rules! assert_failure {
    ($outcome:expr) => {
        match $outcome {
            $crate::Outcome::Failure(_) => {}
            $crate::Outcome::Success(v) => {
                panic!("Expected Failure, got Success: {:?}", v);
            }
            $crate::Outcome::Unhandled(u) => {
                panic!("Expected Failure, got Unhandled: {}", u);
            }
        }
    };
    ($outcome:expr, $expected:expr) => {
        match $outcome {
            $crate::Outcome::Failure(e) => assert_eq!(e, $expected),
            $crate::Outcome::Success(v) => {
                panic!("Expected Failure({:?}), got Success: {:?}", $expected, v);
            }
            $crate::Outcome::Unhandled(u) => {
                panic!("Expected Failure({:?}), got Unhandled: {}", $expected, u);
            }
        }
    };
}

/// Assert that an outcome is an unhandled failure.
///
/// # Example
///
/// ```rust
/// use undertow::{assert_unhandled, Outcome, Unhandled};
///
/// assert_unhandled!(Outcome::<String, i32>::Unhandled(Unhandled::msg("boom")));
/// ```
#[macro_export]
macro_rules! assert_unhandled {
    ($outcome:expr) => {
        match $outcome {
            $crate::Outcome::Unhandled(_) => {}
            $crate::Outcome::Success(v) => {
                panic!("Expected Unhandled, got Success: {:?}", v);
            }
            $crate::Outcome::Failure(e) => {
                panic!("Expected Unhandled, got Failure: {:?}", e);
            }
        }
    };
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
impl<L, R> Arbitrary for crate::Either<L, R>
where
    L: Arbitrary + 'static,
    R: Arbitrary + 'static,
{
    type Parameters = (L::Parameters, R::Parameters);
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
        let (l_params, r_params) = args;
        prop_oneof![
            any_with::<L>(l_params).prop_map(crate::Either::Left),
            any_with::<R>(r_params).prop_map(crate::Either::Right),
        ]
        .boxed()
    }
}

#[cfg(feature = "proptest")]
impl<T> Arbitrary for crate::NonEmptyVec<T>
where
    T: Arbitrary + 'static,
    T::Parameters: Clone,
{
    type Parameters = T::Parameters;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
        (
            any_with::<T>(args.clone()),
            prop::collection::vec(any_with::<T>(args), 0..16),
        )
            .prop_map(|(head, tail)| crate::NonEmptyVec::new(head, tail))
            .boxed()
    }
}
