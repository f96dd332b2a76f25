//! trawl fetches a remote catalog of image descriptors and downloads every
//! image it lists with a bounded pool of workers.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use trawl::{
//!     create_http_client, fetch_catalog, Error, HttpClientConfig, HttpFetcher, PoolBuilder,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let client = create_http_client(HttpClientConfig::default())?;
//! let descriptors = fetch_catalog(&client, trawl::catalog::DEFAULT_CATALOG_URL).await?;
//! let pool = PoolBuilder::new().build(HttpFetcher::new(client))?;
//! let report = pool.run(descriptors).await;
//! println!("{} processed, {} abandoned", report.processed, report.remaining);
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`catalog`] - Descriptors, catalog retrieval and per-item summaries
//! - [`pool`] - The worker pool, its configuration and completion tracking
//! - [`http`] - HTTP client setup and the production fetcher
//! - [`progress`] - Progress bar styling, display and log routing
//! - [`error`] - Centralized error handling with the `Error` enum

pub mod catalog;
pub mod error;
pub mod http;
pub mod pool;
pub mod progress;

pub use catalog::{fetch_catalog, Descriptor, Status, Summary};
pub use error::{Error, Result};
pub use http::{create_http_client, HttpClientConfig, HttpFetcher};
pub use pool::{Backoff, Completion, Fetch, PoolBuilder, RunReport, WorkerPool};
pub use progress::ProgressBarOpts;
