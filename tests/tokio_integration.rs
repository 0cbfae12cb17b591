//! Integration tests for running results on a tokio runtime.
#![cfg(feature = "async")]

use std::time::Duration;

use undertow::executor::Tokio;
use undertow::prelude::*;
use undertow::{assert_failure, assert_success, assert_unhandled};

#[tokio::test(flavor = "multi_thread")]
async fn test_from_future_success() {
    let handle = tokio::runtime::Handle::current();
    let result = AsyncResult::<String, u32>::from_future(&handle, async {
        tokio::time::sleep(Duration::from_millis(5)).await;
        Either::right(3)
    });
    assert_success!(result.map(|n| n * 2).await, 6);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_from_future_expected_error() {
    let handle = tokio::runtime::Handle::current();
    let result = AsyncResult::<String, u32>::from_future(&handle, async {
        Either::left("quota exceeded".to_string())
    });
    assert_failure!(result.await, "quota exceeded".to_string());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_from_future_panic_is_unhandled() {
    let handle = tokio::runtime::Handle::current();
    let result = AsyncResult::<String, u32>::from_future(&handle, async {
        panic!("connection reset");
    });
    let outcome = result.await;
    assert_unhandled!(outcome.clone());
    assert!(outcome.unhandled().unwrap().is_panic());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_tokio_executor_runs_async_of() {
    let exec = Tokio::try_current().expect("inside a runtime");
    let result = AsyncResult::<String, _>::async_of(exec, || {
        std::thread::sleep(Duration::from_millis(5));
        Either::right("blocking work done")
    });
    assert_success!(result.await, "blocking work done");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dispatch_onto_tokio() {
    let exec = Tokio::try_current().expect("inside a runtime");
    let result = AsyncResult::<String, i32>::pure(20)
        .dispatch_on(exec)
        .flat_map(|n| AsyncResult::pure(n + 1))
        .zip(AsyncResult::pure(2))
        .map(|(a, b)| a * b);
    assert_success!(result.await, 42);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_first_success_across_futures() {
    let handle = tokio::runtime::Handle::current();
    let found = first_success_in(
        vec![30u64, 10, 20],
        AsyncResult::raise_error("no replicas".to_string()),
        move |latency| {
            AsyncResult::from_future(&handle, async move {
                tokio::time::sleep(Duration::from_millis(latency)).await;
                if latency < 15 {
                    Either::right(latency)
                } else {
                    Either::left(format!("replica at {}ms too slow", latency))
                }
            })
        },
    );
    assert_success!(found.await, 10);
}

#[test]
fn test_try_current_outside_runtime() {
    assert!(Tokio::try_current().is_none());
}
