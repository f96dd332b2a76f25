//! Completion tracking for a run.
//!
//! Two [`Countdown`]s track a run: one for descriptors still to process and
//! one for workers still alive. Each gets a watcher task; both watchers
//! report to the same channel and the first report ends the run. The two
//! conditions race and that race is the termination policy: if every worker
//! idles out before the queue is drained, the run ends with descriptors left
//! over and they are abandoned.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Notify};
use tokio::task::JoinSet;

/// Which condition ended a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Every descriptor was processed, successfully or not.
    AllItemsProcessed,
    /// Every worker exited on its idle timeout.
    AllWorkersExited,
}

/// A counter that can be awaited until it reaches zero.
#[derive(Debug)]
pub struct Countdown {
    remaining: AtomicUsize,
    zero: Notify,
}

impl Countdown {
    pub fn new(count: usize) -> Self {
        Self {
            remaining: AtomicUsize::new(count),
            zero: Notify::new(),
        }
    }

    /// Current count.
    pub fn remaining(&self) -> usize {
        self.remaining.load(Ordering::Acquire)
    }

    /// Decrements the count and wakes the waiters if it reached zero.
    ///
    /// Returns the new count. Counting down from zero is a no-op.
    pub fn count_down(&self) -> usize {
        let previous = self
            .remaining
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1));

        match previous {
            Ok(1) => {
                self.zero.notify_waiters();
                0
            }
            Ok(n) => n - 1,
            Err(_) => 0,
        }
    }

    /// Waits until the count is zero.
    pub async fn wait_zero(&self) {
        loop {
            // Register before checking so a notification between the check
            // and the await is not lost.
            let notified = self.zero.notified();
            if self.remaining() == 0 {
                return;
            }
            notified.await;
        }
    }
}

/// Waits for whichever countdown reaches zero first.
pub(crate) async fn first_completion(items: Arc<Countdown>, workers: Arc<Countdown>) -> Completion {
    let (tx, mut rx) = mpsc::channel(2);
    let mut watchers = JoinSet::new();

    for (countdown, event) in [
        (items, Completion::AllItemsProcessed),
        (workers, Completion::AllWorkersExited),
    ] {
        let tx = tx.clone();
        watchers.spawn(async move {
            countdown.wait_zero().await;
            let _ = tx.send(event).await;
        });
    }
    drop(tx);

    // Watchers only stop early by panicking, which leaves nobody to work.
    let completion = rx.recv().await.unwrap_or(Completion::AllWorkersExited);
    watchers.abort_all();
    completion
}
