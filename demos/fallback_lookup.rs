//! Demonstrates looking a value up across fallback sources
//!
//! Run with: cargo run --example fallback_lookup --features async,tracing

use std::time::Duration;

use undertow::prelude::*;

#[derive(Debug, Clone, PartialEq)]
enum LookupError {
    Miss(&'static str),
    Timeout(&'static str),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let handle = tokio::runtime::Handle::current();

    tracing::info!("Resolving user 42 across sources");
    let sources = vec!["cache", "replica", "primary"];
    let user = first_success_in(
        sources,
        AsyncResult::raise_error(LookupError::Miss("no sources")),
        move |source| lookup(&handle, source, 42),
    )
    .map(|name| name.to_uppercase());

    match user.await {
        Outcome::Success(name) => tracing::info!("Found user: {}", name),
        Outcome::Failure(e) => tracing::error!("Lookup failed: {:?}", e),
        Outcome::Unhandled(u) => tracing::error!("Lookup crashed: {}", u),
    }

    tracing::info!("Loading a batch of profiles");
    let batch = traverse(1..=3u32, |id| profile(id)).await;
    tracing::info!("Batch result: {:?}", batch);
}

fn lookup(
    handle: &tokio::runtime::Handle,
    source: &'static str,
    id: u32,
) -> AsyncResult<LookupError, String> {
    AsyncResult::from_future(handle, async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        match source {
            "cache" => Either::left(LookupError::Miss(source)),
            "replica" => Either::left(LookupError::Timeout(source)),
            _ => Either::right(format!("user-{}", id)),
        }
    })
    .instrument(tracing::info_span!("lookup", source, id))
}

fn profile(id: u32) -> AsyncResult<LookupError, String> {
    AsyncResult::async_of(ThreadPerTask, move || Either::right(format!("profile-{}", id)))
        .instrument(tracing::debug_span!("profile", id))
}
