//! Production [`Fetch`] implementation over HTTP.

use crate::catalog::Descriptor;
use crate::error::{Error, Result};
use crate::pool::Fetch;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Response;
use reqwest_middleware::ClientWithMiddleware;
use std::path::{Path, PathBuf};
use tokio::{fs, io::AsyncWriteExt};
use tracing::debug;

/// Downloads one image per call and writes it verbatim to the target path.
///
/// The body is streamed into `<target>.part` and renamed once complete, so
/// an interrupted transfer never leaves a file that a later run would treat
/// as already downloaded.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: ClientWithMiddleware,
}

impl HttpFetcher {
    /// Wraps an existing client.
    pub fn new(client: ClientWithMiddleware) -> Self {
        Self { client }
    }

    /// Gets the underlying client.
    pub fn client(&self) -> &ClientWithMiddleware {
        &self.client
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, descriptor: &Descriptor, target: &Path) -> Result<()> {
        let url = descriptor.download_url()?;

        debug!("Fetching {}", url);
        let res = self.client.get(url.clone()).send().await?;

        let status = res.status();
        if !status.is_success() {
            return Err(Error::Http {
                status,
                url: url.to_string(),
            });
        }

        let partial = partial_path(target);
        if let Err(e) = write_body(res, &partial).await {
            // The partial file is useless on its own; the next attempt starts over.
            let _ = fs::remove_file(&partial).await;
            return Err(e);
        }

        debug!("Moving {:?} into place", &partial);
        fs::rename(&partial, target).await?;
        Ok(())
    }
}

/// Streams the response body into `path`, chunk by chunk.
async fn write_body(res: Response, path: &Path) -> Result<()> {
    let mut file = fs::File::create(path).await?;
    let mut stream = res.bytes_stream();
    while let Some(item) = stream.next().await {
        let mut chunk = item?;
        file.write_all_buf(&mut chunk).await?;
    }
    file.flush().await?;
    Ok(())
}

/// `images/a.jpeg` becomes `images/a.jpeg.part`.
fn partial_path(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}
