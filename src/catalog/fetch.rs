//! Catalog retrieval.
//!
//! Any failure here is fatal: the run never starts workers without a
//! non-empty catalog.

use super::descriptor::Descriptor;
use crate::error::{Error, Result};

use reqwest_middleware::ClientWithMiddleware;
use tracing::{debug, info};

/// Catalog endpoint queried when none is configured.
pub const DEFAULT_CATALOG_URL: &str = "https://unsplash.it/list";

/// Retrieves the catalog at `url` and decodes it.
///
/// Fails on transport errors, non-success statuses, bodies that are not a
/// JSON array of descriptors, and empty arrays.
pub async fn fetch_catalog(client: &ClientWithMiddleware, url: &str) -> Result<Vec<Descriptor>> {
    debug!("Fetching catalog {}", url);
    let res = client
        .get(url)
        .send()
        .await
        .map_err(|source| Error::CatalogRequest {
            url: url.to_string(),
            source,
        })?;

    let status = res.status();
    if !status.is_success() {
        return Err(Error::Http {
            status,
            url: url.to_string(),
        });
    }

    let body = res.text().await.map_err(|e| Error::CatalogRequest {
        url: url.to_string(),
        source: e.into(),
    })?;

    let descriptors = decode_catalog(&body)?;
    info!(count = descriptors.len(), "Catalog retrieved");
    Ok(descriptors)
}

/// Decodes a catalog body, rejecting empty catalogs.
pub fn decode_catalog(body: &str) -> Result<Vec<Descriptor>> {
    let descriptors: Vec<Descriptor> =
        serde_json::from_str(body).map_err(|source| Error::CatalogDecode {
            body: body.to_string(),
            source,
        })?;

    if descriptors.is_empty() {
        return Err(Error::EmptyCatalog {
            body: body.to_string(),
        });
    }

    Ok(descriptors)
}
