//! The worker pool itself.

use super::completion::{first_completion, Completion, Countdown};
use super::config::PoolConfig;
use super::queue;
use super::worker::Worker;
use super::Fetch;
use crate::catalog::Descriptor;
use crate::progress::ProgressDisplay;

use futures::stream::{self, Stream};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// What a run achieved by the time it ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// Which condition ended the run.
    pub completion: Completion,
    /// Descriptors processed, successfully or not.
    pub processed: usize,
    /// Descriptors never processed; abandoned when every worker idled out.
    pub remaining: usize,
    /// Workers that exited on their idle timeout.
    pub workers_exited: usize,
}

/// Runs a catalog through a fixed set of workers.
///
/// A pool can be created via its builder:
///
/// ```rust
/// # use trawl::{catalog::Descriptor, pool::{Fetch, PoolBuilder}, Result};
/// # use std::path::Path;
/// # struct Noop;
/// # #[async_trait::async_trait]
/// # impl Fetch for Noop {
/// #     async fn fetch(&self, _: &Descriptor, _: &Path) -> Result<()> { Ok(()) }
/// # }
/// let pool = PoolBuilder::new().workers(2).build(Noop).unwrap();
/// assert_eq!(pool.workers(), 2);
/// ```
pub struct WorkerPool<F> {
    config: Arc<PoolConfig>,
    fetcher: Arc<F>,
}

impl<F> fmt::Debug for WorkerPool<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerPool")
            .field("config", &self.config)
            .finish()
    }
}

impl<F> Clone for WorkerPool<F> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            fetcher: self.fetcher.clone(),
        }
    }
}

impl<F: Fetch + 'static> WorkerPool<F> {
    /// Creates a pool from an already validated configuration.
    pub(crate) fn new(config: PoolConfig, fetcher: F) -> Self {
        Self {
            config: Arc::new(config),
            fetcher: Arc::new(fetcher),
        }
    }

    /// Gets the number of workers.
    pub fn workers(&self) -> usize {
        self.config.workers
    }

    /// Gets the maximum number of attempts per descriptor.
    pub fn retries(&self) -> u32 {
        self.config.retries
    }

    /// Gets the idle timeout after which a worker exits.
    pub fn idle_timeout(&self) -> Duration {
        self.config.idle_timeout
    }

    /// Gets the directory the images are written to.
    pub fn directory(&self) -> &PathBuf {
        &self.config.directory
    }

    /// Gets the fetcher the workers call.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Processes the descriptors in catalog order.
    pub async fn run(&self, descriptors: Vec<Descriptor>) -> RunReport {
        let total = descriptors.len();
        self.run_stream(total, stream::iter(descriptors)).await
    }

    /// Processes descriptors as the stream yields them.
    ///
    /// `total` is the number of descriptors the stream will yield. The run
    /// counts as complete once that many have been processed, so the stream
    /// never needs to end.
    pub async fn run_stream<S>(&self, total: usize, descriptors: S) -> RunReport
    where
        S: Stream<Item = Descriptor> + Send + 'static,
    {
        let items = Arc::new(Countdown::new(total));
        let workers = Arc::new(Countdown::new(self.config.workers));
        let progress = ProgressDisplay::new(
            self.config.progress.clone(),
            total,
            self.config.progress_target.as_ref(),
        );

        let (tx, queue) = queue::channel(self.config.workers);
        let producer = queue::spawn_producer(tx, descriptors);

        let mut pool = JoinSet::new();
        for id in 0..self.config.workers {
            let worker = Worker {
                id,
                config: self.config.clone(),
                fetcher: self.fetcher.clone(),
                queue: queue.clone(),
                items: items.clone(),
                workers: workers.clone(),
                progress: progress.clone(),
            };
            pool.spawn(worker.run());
        }
        info!(
            workers = self.config.workers,
            total, "Worker pool started"
        );

        let completion = first_completion(items.clone(), workers.clone()).await;

        // Whatever is still queued or not yet produced is abandoned here.
        producer.abort();
        pool.shutdown().await;
        progress.finish();

        let remaining = items.remaining();
        let report = RunReport {
            completion,
            processed: total - remaining,
            remaining,
            workers_exited: self.config.workers - workers.remaining(),
        };

        match completion {
            Completion::AllItemsProcessed => {
                info!(processed = report.processed, "All items processed");
            }
            Completion::AllWorkersExited if remaining > 0 => {
                warn!(
                    processed = report.processed,
                    remaining, "All workers exited, abandoning the remaining items"
                );
            }
            Completion::AllWorkersExited => {
                info!(processed = report.processed, "All workers exited");
            }
        }

        report
    }
}
