//! Ordered parallel dispatch of per-line collision queries.
//!
//! Fans the probe lines of a single layer out to a bounded pool of worker
//! threads and folds the results back on the calling thread, strictly in
//! input order regardless of completion order. The per-result sink drives
//! progress reporting and may request cooperative cancellation: no further
//! items are scheduled, in-flight queries run to completion and their
//! results are dropped.

use crossbeam_channel::unbounded;
use millkit_core::{Error, Result};
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;

/// Worker count used when the caller does not fix one.
pub fn default_workers() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Run `job` over every item, feeding each result to `sink` in input order.
///
/// `sink` runs on the calling thread and receives `(index, result)` pairs;
/// returning `true` from it requests cancellation. With `workers <= 1` or a
/// single item the batch runs serially on the calling thread.
///
/// The first failing job aborts the whole batch and surfaces as
/// [`Error::OperationFailed`] carrying the item's index; job failures are
/// never swallowed.
pub fn map_ordered<I, R, F, S>(items: &[I], workers: usize, job: F, mut sink: S) -> Result<()>
where
    I: Sync,
    R: Send,
    F: Fn(&I) -> Result<R> + Sync,
    S: FnMut(usize, R) -> bool,
{
    if items.is_empty() {
        return Ok(());
    }

    if workers <= 1 || items.len() == 1 {
        for (index, item) in items.iter().enumerate() {
            let result = job(item).map_err(|err| operation_failed(index, err))?;
            if sink(index, result) {
                break;
            }
        }
        return Ok(());
    }

    let cursor = AtomicUsize::new(0);
    let cancelled = AtomicBool::new(false);
    let failure: Mutex<Option<(usize, Error)>> = Mutex::new(None);
    let (tx, rx) = unbounded::<(usize, R)>();

    thread::scope(|scope| {
        let cursor = &cursor;
        let cancelled = &cancelled;
        let failure = &failure;
        let job = &job;

        for _ in 0..workers.min(items.len()) {
            let tx = tx.clone();
            scope.spawn(move || loop {
                if cancelled.load(Ordering::Relaxed) {
                    break;
                }
                let index = cursor.fetch_add(1, Ordering::Relaxed);
                if index >= items.len() {
                    break;
                }
                match job(&items[index]) {
                    Ok(result) => {
                        if tx.send((index, result)).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        let mut slot = failure.lock();
                        if slot.as_ref().map_or(true, |(first, _)| index < *first) {
                            *slot = Some((index, err));
                        }
                        cancelled.store(true, Ordering::Relaxed);
                        break;
                    }
                }
            });
        }
        drop(tx);

        // Reorder buffer: results arrive in completion order but are
        // released to the sink in input order.
        let mut pending: Vec<Option<R>> = Vec::new();
        pending.resize_with(items.len(), || None);
        let mut next = 0;

        'fold: while next < items.len() {
            let Ok((index, result)) = rx.recv() else {
                // All workers exited; a failure or cancellation cut the
                // batch short.
                break;
            };
            pending[index] = Some(result);
            while next < items.len() {
                let Some(result) = pending[next].take() else {
                    break;
                };
                if sink(next, result) {
                    cancelled.store(true, Ordering::Relaxed);
                    break 'fold;
                }
                next += 1;
            }
        }
    });

    match failure.into_inner() {
        Some((index, err)) => Err(operation_failed(index, err)),
        None => Ok(()),
    }
}

fn operation_failed(segment: usize, err: Error) -> Error {
    Error::OperationFailed {
        segment,
        message: err.to_string(),
    }
}
