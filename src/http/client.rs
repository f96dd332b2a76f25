//! HTTP client setup and middleware configuration.
//!
//! The client carries a fixed overall request timeout. It is the only bound
//! on a stuck transfer: workers have no way to cancel a call in flight.
//!
//! There is deliberately no retry middleware here. Retries are counted per
//! descriptor by the worker pool, so a transport-level retry layer would
//! multiply the configured attempt count.

use crate::error::{Error, Result};
use reqwest::{header::HeaderMap, Proxy};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use std::time::Duration;

/// Overall timeout applied to every request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Configuration for HTTP client setup.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Overall timeout for a request, body included.
    pub timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
    /// Optional proxy configuration.
    pub proxy: Option<Proxy>,
    /// Default headers to include with all requests.
    pub headers: Option<HeaderMap>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).into(),
            proxy: None,
            headers: None,
        }
    }
}

impl HttpClientConfig {
    /// Rejects configurations no request could succeed with.
    ///
    /// A zero timeout makes every request fail at once.
    pub fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(Error::Config("the HTTP timeout must be positive".into()));
        }
        Ok(())
    }
}

/// Creates an HTTP client with middleware configuration.
///
/// ```rust
/// use trawl::http::client::{create_http_client, HttpClientConfig};
///
/// let client = create_http_client(HttpClientConfig::default()).unwrap();
/// ```
pub fn create_http_client(
    config: HttpClientConfig,
) -> std::result::Result<ClientWithMiddleware, reqwest::Error> {
    let mut inner_client_builder = reqwest::Client::builder()
        .timeout(config.timeout)
        .user_agent(config.user_agent);

    if let Some(proxy) = config.proxy {
        inner_client_builder = inner_client_builder.proxy(proxy);
    }

    if let Some(headers) = config.headers {
        inner_client_builder = inner_client_builder.default_headers(headers);
    }

    let inner_client = inner_client_builder.build()?;

    let client = ClientBuilder::new(inner_client)
        // Trace HTTP requests. See the tracing crate to make use of these traces.
        .with(TracingMiddleware::default())
        .build();

    Ok(client)
}
