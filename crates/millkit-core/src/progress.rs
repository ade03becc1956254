//! Progress reporting and cancellation for long-running generation.
//!
//! A generation run owns one [`ProgressCounter`] sized from the total number
//! of work units (probe lines). The counter and the generator share a single
//! [`StatusCallback`]; returning `true` from the callback requests
//! cooperative cancellation.

use crate::data::{Move, Point3D};
use crate::types::{shared, Shared};

/// Status payload handed to a [`StatusCallback`].
///
/// All fields are optional; each reporting site fills in what it knows.
#[derive(Debug, Default)]
pub struct StatusUpdate<'a> {
    /// Human-readable status line.
    pub text: Option<&'a str>,
    /// Completion percentage in `0.0..=100.0`.
    pub percent: Option<f64>,
    /// Position of the tool after the most recent probe.
    pub tool_position: Option<Point3D>,
    /// The moves accumulated so far.
    pub toolpath: Option<&'a [Move]>,
}

/// Live-update callback invoked from the generation thread.
///
/// Returning `true` requests cancellation. The callback may redraw a
/// progress bar or viewport; it runs synchronously in the caller's context
/// and is never invoked from worker threads.
pub type StatusCallback = Shared<Box<dyn FnMut(&StatusUpdate<'_>) -> bool>>;

/// Wrap a closure into a [`StatusCallback`].
pub fn status_callback<F>(f: F) -> StatusCallback
where
    F: FnMut(&StatusUpdate<'_>) -> bool + 'static,
{
    shared(Box::new(f) as Box<dyn FnMut(&StatusUpdate<'_>) -> bool>)
}

/// Tracks completed work units and relays cancellation requests.
///
/// The completed count only grows. Results are folded on a single thread,
/// one at a time, so the counter needs no internal locking.
pub struct ProgressCounter {
    total: usize,
    done: usize,
    callback: Option<StatusCallback>,
}

impl ProgressCounter {
    /// Create a counter for `total` work units reporting to `callback`.
    pub fn new(total: usize, callback: Option<StatusCallback>) -> Self {
        Self {
            total,
            done: 0,
            callback,
        }
    }

    /// Completed units so far.
    pub fn done(&self) -> usize {
        self.done
    }

    /// Completion percentage in `0.0..=100.0`.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            100.0 * self.done as f64 / self.total as f64
        }
    }

    /// Forward a status report to the callback.
    ///
    /// Returns `true` if the callback requested cancellation.
    pub fn update(&mut self, update: &StatusUpdate<'_>) -> bool {
        match &self.callback {
            Some(callback) => callback.borrow_mut()(update),
            None => false,
        }
    }

    /// Record one completed unit and report the new percentage.
    ///
    /// Returns `true` if the callback requested cancellation.
    pub fn increment(&mut self) -> bool {
        self.done += 1;
        let update = StatusUpdate {
            percent: Some(self.percent()),
            ..StatusUpdate::default()
        };
        self.update(&update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_percent_progression() {
        let mut counter = ProgressCounter::new(4, None);
        assert_eq!(counter.percent(), 0.0);
        assert!(!counter.increment());
        assert_eq!(counter.percent(), 25.0);
        assert!(!counter.increment());
        assert!(!counter.increment());
        assert!(!counter.increment());
        assert_eq!(counter.percent(), 100.0);
        assert_eq!(counter.done(), 4);
    }

    #[test]
    fn test_empty_total_is_complete() {
        let counter = ProgressCounter::new(0, None);
        assert_eq!(counter.percent(), 100.0);
    }

    #[test]
    fn test_increment_relays_cancellation() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let seen = calls.clone();
        let callback = status_callback(move |update| {
            seen.borrow_mut().push(update.percent);
            // cancel once half the work is done
            update.percent.is_some_and(|p| p >= 50.0)
        });

        let mut counter = ProgressCounter::new(2, Some(callback));
        assert!(!counter.increment());
        assert!(counter.increment());
        assert_eq!(*calls.borrow(), vec![Some(50.0), Some(100.0)]);
    }

    #[test]
    fn test_update_passes_status_through() {
        let text = Rc::new(RefCell::new(String::new()));
        let sink = text.clone();
        let callback = status_callback(move |update| {
            if let Some(t) = update.text {
                sink.borrow_mut().push_str(t);
            }
            false
        });

        let mut counter = ProgressCounter::new(1, Some(callback));
        let update = StatusUpdate {
            text: Some("processing layer 1/3"),
            ..StatusUpdate::default()
        };
        assert!(!counter.update(&update));
        assert_eq!(*text.borrow(), "processing layer 1/3");
    }
}
