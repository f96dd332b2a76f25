//! Error handling for trawl.
//!
//! Startup failures (catalog retrieval, catalog decoding, invalid configuration)
//! surface as [`Error`] and abort the run. Per-item download failures use the
//! same type but never leave the worker that hit them.

use reqwest::StatusCode;
use std::io;
use thiserror::Error;

/// Errors that can happen when using trawl.
#[derive(Error, Debug)]
pub enum Error {
    /// The catalog endpoint could not be reached or its body could not be read.
    #[error("couldn't retrieve the catalog from {url}: {source}")]
    CatalogRequest {
        url: String,
        #[source]
        source: reqwest_middleware::Error,
    },

    /// The catalog body is not a JSON array of descriptors.
    ///
    /// The raw body is kept so the operator can see what the endpoint returned.
    #[error("couldn't decode the catalog ({body}): {source}")]
    CatalogDecode {
        body: String,
        #[source]
        source: serde_json::Error,
    },

    /// The catalog decoded fine but contains no descriptors.
    #[error("catalog is empty: {body}")]
    EmptyCatalog { body: String },

    /// Error from the underlying URL parser or the expected URL format.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The configuration cannot be used to start a run.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The server answered with a non-success status.
    #[error("{url} answered with {status}")]
    Http { status: StatusCode, url: String },

    /// I/O Error.
    #[error("I/O error: {source}")]
    IOError {
        #[from]
        source: io::Error,
    },

    /// Error from the Reqwest library.
    #[error("Reqwest error: {source}")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },

    /// Error raised by the HTTP middleware stack.
    #[error("HTTP middleware error: {source}")]
    Middleware {
        #[from]
        source: reqwest_middleware::Error,
    },
}

/// Result type alias for operations that can fail with a trawl error.
pub type Result<T> = std::result::Result<T, Error>;
