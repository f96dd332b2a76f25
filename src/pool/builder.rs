//! Builder pattern implementation for creating [`WorkerPool`] instances.
//!
//! ```rust
//! use std::time::Duration;
//! use trawl::pool::{Backoff, PoolBuilder};
//!
//! let builder = PoolBuilder::new()
//!     .directory("./images".into())
//!     .workers(8)
//!     .retries(5)
//!     .idle_timeout(Duration::from_secs(30))
//!     .backoff(Backoff::default())
//!     .on_complete(|summary| {
//!         println!("{}: {:?}", summary.descriptor().filename, summary.status());
//!     });
//! ```

use super::config::{Backoff, PoolConfig};
use super::pool::WorkerPool;
use super::Fetch;
use crate::catalog::Summary;
use crate::error::Result;
use crate::progress::ProgressBarOpts;

use indicatif::MultiProgress;
use std::{path::PathBuf, sync::Arc, time::Duration};

/// A builder used to create a [`WorkerPool`].
#[derive(Default)]
pub struct PoolBuilder {
    config: PoolConfig,
}

impl PoolBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        PoolBuilder::default()
    }

    /// Convenience function to hide the progress bar.
    pub fn hidden() -> Self {
        let mut builder = PoolBuilder::default();
        builder.config.progress = ProgressBarOpts::hidden();
        builder
    }

    /// Sets the directory where to store the images.
    pub fn directory(mut self, directory: PathBuf) -> Self {
        self.config.directory = directory;
        self
    }

    /// Set the number of workers.
    pub fn workers(mut self, workers: usize) -> Self {
        self.config.workers = workers;
        self
    }

    /// Set the maximum number of attempts per descriptor.
    pub fn retries(mut self, retries: u32) -> Self {
        self.config.retries = retries;
        self
    }

    /// Set how long a worker waits for work before exiting.
    pub fn idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.config.idle_timeout = idle_timeout;
        self
    }

    /// Wait between attempts on the same descriptor.
    pub fn backoff(mut self, backoff: Backoff) -> Self {
        self.config.backoff = Some(backoff);
        self
    }

    /// Set the progress bar options.
    pub fn progress(mut self, progress: ProgressBarOpts) -> Self {
        self.config.progress = progress;
        self
    }

    /// Draw the progress bar through `multi`.
    ///
    /// Pair it with [`ProgressLogs`](crate::progress::ProgressLogs) over the
    /// same `multi` to keep log lines off the bar.
    pub fn progress_target(mut self, multi: MultiProgress) -> Self {
        self.config.progress_target = Some(multi);
        self
    }

    /// Set callback for when each descriptor is processed.
    ///
    /// The callback runs on the worker that handled the descriptor, before
    /// the descriptor counts as processed.
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Summary) + Send + Sync + 'static,
    {
        self.config.on_complete = Some(Arc::new(Box::new(callback)));
        self
    }

    /// Gets the configuration built so far.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Create the [`WorkerPool`] with the specified options.
    pub fn build<F: Fetch + 'static>(self, fetcher: F) -> Result<WorkerPool<F>> {
        self.config.validate()?;
        Ok(WorkerPool::new(self.config, fetcher))
    }
}
