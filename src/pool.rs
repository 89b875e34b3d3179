//! Worker Pool Module
//!
//! Bounded fan-out/fan-in execution for the build and query phases.
//!
//! ## Responsibilities
//! - Cap in-flight parallelism at an explicit limit so a large key batch or
//!   data file cannot spawn unbounded workers
//! - Block the caller until every item has been processed (barrier join —
//!   no partial or streaming completion)
//! - Optionally pin related items to one worker so they never interleave
//!
//! Workers drain crossbeam channels inside a thread scope; the channel
//! bound provides backpressure against the producer.

use crossbeam::channel;

/// Process every item on at most `limit` worker threads, in no particular
/// order. Returns after all items have been processed.
///
/// `job` is responsible for its own error handling: one item's failure must
/// not affect the others, so nothing is propagated from here.
pub fn for_each_bounded<T, F>(limit: usize, items: Vec<T>, job: F)
where
    T: Send,
    F: Fn(T) + Sync,
{
    if items.is_empty() {
        return;
    }
    let workers = limit.max(1).min(items.len());
    let (tx, rx) = channel::bounded::<T>(workers);
    let job = &job;
    crossbeam::thread::scope(|scope| {
        for _ in 0..workers {
            let rx = rx.clone();
            scope.spawn(move |_| {
                for item in rx.iter() {
                    job(item);
                }
            });
        }
        drop(rx);
        for item in items {
            // send fails only when every worker is gone, i.e. a panic
            if tx.send(item).is_err() {
                break;
            }
        }
        drop(tx);
    })
    .unwrap_or_else(|_| panic!("worker thread panicked"));
}

/// Like [`for_each_bounded`], but items with the same route value are
/// processed by the same worker, in submission order. Items with different
/// routes still run in parallel.
///
/// The build phase routes by shard id, which makes "appends to one shard
/// never interleave or reorder" a structural property instead of a locking
/// discipline.
pub fn for_each_routed<T, F>(
    limit: usize,
    items: Vec<T>,
    route: impl Fn(&T) -> usize,
    job: F,
) where
    T: Send,
    F: Fn(T) + Sync,
{
    if items.is_empty() {
        return;
    }
    let workers = limit.max(1).min(items.len());
    let lanes: Vec<_> = (0..workers).map(|_| channel::bounded::<T>(64)).collect();
    let job = &job;
    crossbeam::thread::scope(|scope| {
        let mut senders = Vec::with_capacity(workers);
        for (tx, rx) in lanes {
            senders.push(tx);
            scope.spawn(move |_| {
                for item in rx.iter() {
                    job(item);
                }
            });
        }
        for item in items {
            let lane = route(&item) % workers;
            if senders[lane].send(item).is_err() {
                break;
            }
        }
        drop(senders);
    })
    .unwrap_or_else(|_| panic!("worker thread panicked"));
}
