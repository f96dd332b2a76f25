//! Catalog module: what there is to download and what happened to it.
//!
//! - [`descriptor`] - The [`Descriptor`] decoded from each catalog entry
//! - [`fetch`] - Retrieval and validation of the remote catalog
//! - [`summary`] - Per-item outcome records handed to completion callbacks
//!
//! # Examples
//!
//! ```rust,no_run
//! use trawl::catalog::fetch_catalog;
//! use trawl::http::{create_http_client, HttpClientConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_http_client(HttpClientConfig::default())?;
//! let descriptors = fetch_catalog(&client, "https://unsplash.it/list").await?;
//! println!("{} images listed", descriptors.len());
//! # Ok(())
//! # }
//! ```

pub mod descriptor;
pub mod fetch;
pub mod summary;

pub use descriptor::Descriptor;
pub use fetch::{fetch_catalog, DEFAULT_CATALOG_URL};
pub use summary::{Status, Summary};
