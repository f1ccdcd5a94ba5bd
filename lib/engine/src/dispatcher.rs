use ahash::AHashMap;
use futures_util::stream::{FuturesUnordered, StreamExt};
use neardup_core::{Error, Item, ItemKey, Result};
use std::fmt::Display;
use std::future::Future;

/// Runs `op` exactly once per item with at most `max_concurrency` calls in
/// flight, returning the per-item results keyed by item key.
///
/// `max_concurrency` is clamped to at least 1 and at most the number of
/// items. Completion order is unconstrained; the result map is keyed by
/// item regardless of arrival order. On the first failure no further work
/// is submitted, already in-flight calls drain, and the error propagates
/// labeled with the failing item's key. This layer never retries; a
/// failing call is terminal for the whole pass.
pub async fn dispatch<'a, T, E, F, Fut>(
    items: &'a [Item],
    max_concurrency: usize,
    op: F,
) -> Result<AHashMap<ItemKey, T>>
where
    F: Fn(&'a Item) -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
    E: Display,
{
    let keyed = |item: &'a Item| {
        let key = item.key.clone();
        let call = op(item);
        async move { (key, call.await) }
    };

    let workers = max_concurrency.max(1).min(items.len());
    let mut queue = items.iter();
    let mut in_flight: FuturesUnordered<_> =
        queue.by_ref().take(workers).map(|item| keyed(item)).collect();

    let mut results = AHashMap::with_capacity(items.len());
    let mut first_error: Option<Error> = None;

    while let Some((key, outcome)) = in_flight.next().await {
        match outcome {
            Ok(value) => {
                results.insert(key, value);
                // Refill only while no error has been seen; after a
                // failure the in-flight calls drain but nothing new starts.
                if first_error.is_none() {
                    if let Some(item) = queue.next() {
                        in_flight.push(keyed(item));
                    }
                }
            }
            Err(cause) => {
                if first_error.is_none() {
                    first_error = Some(Error::item_operation(key, cause));
                }
            }
        }
    }

    match first_error {
        Some(error) => Err(error),
        None => Ok(results),
    }
}
