//! Bounded-concurrency fan-out shared by host discovery and port scanning.

use futures::future;
use futures::stream::{self, StreamExt};
use std::fmt::Display;
use std::future::Future;
use tracing::warn;

/// Run `probe` for every item with at most `limit` probes in flight and
/// return the items whose probe succeeded, in ascending order.
///
/// Each probe runs as its own task. New tasks are only spawned once a slot
/// frees up, and every spawned task is awaited before returning. A task that
/// panics counts as a negative result. Results are collected per task and
/// merged after the join, so completion order never leaks into the output.
pub(crate) async fn probe_all<T, I, F, Fut>(items: I, limit: usize, probe: F) -> Vec<T>
where
    T: Ord + Copy + Display + Send + 'static,
    I: IntoIterator<Item = T>,
    F: Fn(T) -> Fut,
    Fut: Future<Output = bool> + Send + 'static,
{
    let mut hits: Vec<T> = stream::iter(items)
        .map(|item| {
            let task = tokio::spawn(probe(item));
            async move {
                match task.await {
                    Ok(true) => Some(item),
                    Ok(false) => None,
                    Err(e) => {
                        warn!(item = %item, error = %e, "probe task failed, counting as negative");
                        None
                    }
                }
            }
        })
        .buffer_unordered(limit.max(1))
        .filter_map(future::ready)
        .collect()
        .await;

    hits.sort_unstable();
    hits
}
