//! The per-worker loop.
//!
//! Each iteration waits on two events at once: the next descriptor and the
//! idle timer. A descriptor restarts the cycle once processed; the timer
//! ends the worker permanently.
//!
//! ```text
//! Idle --descriptor--> Downloading --processed--> Idle
//! Idle --idle timeout--> Exited
//! ```

use super::completion::Countdown;
use super::config::PoolConfig;
use super::queue::WorkQueue;
use super::Fetch;
use crate::catalog::{Descriptor, Status, Summary};
use crate::progress::ProgressDisplay;

use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, error, info, warn};

pub(crate) struct Worker<F> {
    pub(crate) id: usize,
    pub(crate) config: Arc<PoolConfig>,
    pub(crate) fetcher: Arc<F>,
    pub(crate) queue: WorkQueue,
    pub(crate) items: Arc<Countdown>,
    pub(crate) workers: Arc<Countdown>,
    pub(crate) progress: ProgressDisplay,
}

impl<F: Fetch> Worker<F> {
    pub(crate) async fn run(self) {
        debug!(worker = self.id, "Worker started");
        loop {
            tokio::select! {
                // A closed, empty queue disables this branch and leaves the
                // timer to decide.
                Some(descriptor) = self.queue.next() => {
                    let summary = self.process(descriptor).await;
                    self.progress.item_done(&summary.descriptor().filename);
                    if let Some(ref callback) = self.config.on_complete {
                        callback(&summary);
                    }
                    self.items.count_down();
                }
                _ = tokio::time::sleep(self.config.idle_timeout) => {
                    info!(
                        worker = self.id,
                        "Worker idle for {:?}, exiting", self.config.idle_timeout
                    );
                    self.workers.count_down();
                    return;
                }
            }
        }
    }

    /// Handles one descriptor. Never fails: the outcome goes in the summary.
    async fn process(&self, descriptor: Descriptor) -> Summary {
        let target = descriptor.target(&self.config.directory);

        match fs::try_exists(&target).await {
            Ok(true) => {
                debug!(worker = self.id, filename = %descriptor.filename, "Already downloaded");
                return Summary::new(
                    descriptor,
                    Status::Skipped("the file is already on disk".into()),
                    0,
                );
            }
            Ok(false) => (),
            Err(e) => {
                debug!(worker = self.id, error = %e, "Couldn't check {:?}, downloading", &target);
            }
        }

        self.fetch_with_retries(descriptor, &target).await
    }

    /// Attempts the transfer up to `retries` times, stopping at the first success.
    async fn fetch_with_retries(&self, descriptor: Descriptor, target: &Path) -> Summary {
        let max_attempts = self.config.retries;
        let mut attempt = 0;

        loop {
            attempt += 1;
            match self.fetcher.fetch(&descriptor, target).await {
                Ok(()) => {
                    info!(
                        worker = self.id,
                        attempt,
                        "done downloading {}", descriptor.filename
                    );
                    return Summary::new(descriptor, Status::Success, attempt);
                }
                Err(e) if attempt < max_attempts => {
                    warn!(
                        worker = self.id,
                        filename = %descriptor.filename,
                        attempt,
                        max_attempts,
                        error = %e,
                        "Attempt failed, retrying"
                    );
                    if let Some(backoff) = self.config.backoff {
                        tokio::time::sleep(backoff.delay(attempt - 1)).await;
                    }
                }
                Err(e) => {
                    error!(
                        worker = self.id,
                        attempts = attempt,
                        "couldn't download {}: {}", descriptor.filename, e
                    );
                    return Summary::new(descriptor, Status::Fail(e.to_string()), attempt);
                }
            }
        }
    }
}
