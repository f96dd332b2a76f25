//! Worker pool: the producer/consumer harness that drives a run.
//!
//! A single producer feeds descriptors into a bounded queue whose capacity
//! equals the worker count. A fixed set of workers drains it, each applying
//! a bounded retry policy per descriptor and exiting for good after an idle
//! window with nothing to receive. The run ends as soon as either every
//! descriptor has been processed or every worker has exited, whichever
//! happens first.
//!
//! - `config` - [`PoolConfig`], [`Backoff`] and the completion callback type
//! - `builder` - [`PoolBuilder`]
//! - `queue` - Work queue wiring and the producer task
//! - `worker` - The per-worker loop and retry policy
//! - `completion` - [`Countdown`] and the completion coordinator
//! - `pool` - [`WorkerPool`] and [`RunReport`]
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use trawl::catalog::fetch_catalog;
//! use trawl::http::{create_http_client, HttpClientConfig, HttpFetcher};
//! use trawl::pool::PoolBuilder;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_http_client(HttpClientConfig::default())?;
//! let descriptors = fetch_catalog(&client, "https://unsplash.it/list").await?;
//!
//! let pool = PoolBuilder::new()
//!     .workers(4)
//!     .retries(3)
//!     .idle_timeout(Duration::from_secs(30))
//!     .build(HttpFetcher::new(client))?;
//!
//! let report = pool.run(descriptors).await;
//! println!("{:?} after {} items", report.completion, report.processed);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod completion;
pub mod config;
pub mod pool;
mod queue;
mod worker;

pub use builder::PoolBuilder;
pub use completion::{Completion, Countdown};
pub use config::{Backoff, CompletionCallback, PoolConfig};
pub use pool::{RunReport, WorkerPool};

use crate::catalog::Descriptor;
use crate::error::Result;

use async_trait::async_trait;
use std::path::Path;

/// Transfers one descriptor's bytes to its target path.
///
/// Workers call this once per attempt. Implementations must not create the
/// output directory and should not leave a file at `target` unless the
/// transfer completed.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, descriptor: &Descriptor, target: &Path) -> Result<()>;
}
