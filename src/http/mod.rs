//! HTTP module containing the client factory and the production fetcher.
//!
//! - [`client`] - HTTP client creation and middleware configuration
//! - [`fetcher`] - [`HttpFetcher`], which writes one image per call
//!
//! # Examples
//!
//! ```rust
//! use trawl::http::{create_http_client, HttpClientConfig, HttpFetcher};
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HttpClientConfig {
//!     timeout: Duration::from_secs(5),
//!     ..HttpClientConfig::default()
//! };
//! let fetcher = HttpFetcher::new(create_http_client(config)?);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod fetcher;

pub use client::{create_http_client, HttpClientConfig};
pub use fetcher::HttpFetcher;
