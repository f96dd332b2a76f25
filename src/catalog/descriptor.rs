//! Catalog entries.

use crate::error::{Error, Result};

use reqwest::Url;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Suffix appended to a descriptor's `post_url` to reach the image bytes.
const DOWNLOAD_SUFFIX: &str = "/download";

/// One downloadable image, as listed by the catalog endpoint.
///
/// Descriptors are decoded once and never mutated afterwards. Only
/// `filename` and `post_url` matter to the download path; the rest is
/// carried along for callers and log lines.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Descriptor {
    /// Catalog identifier.
    pub id: u64,
    /// File name used to save the image on disk.
    pub filename: String,
    /// Image format, e.g. `jpeg`.
    pub format: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Name of the photographer.
    pub author: String,
    /// Profile page of the photographer.
    pub author_url: String,
    /// Page of the original post; the download endpoint hangs off it.
    pub post_url: String,
}

impl Descriptor {
    /// Builds the URL the image bytes are fetched from.
    ///
    /// ```rust
    /// # use trawl::catalog::Descriptor;
    /// let d = Descriptor {
    ///     id: 0,
    ///     filename: "0000_yC-Yzbqy7PY.jpeg".into(),
    ///     format: "jpeg".into(),
    ///     width: 5616,
    ///     height: 3744,
    ///     author: "Alejandro Escamilla".into(),
    ///     author_url: "https://unsplash.com/@alejandroescamilla".into(),
    ///     post_url: "https://unsplash.com/photos/yC-Yzbqy7PY".into(),
    /// };
    /// assert_eq!(
    ///     d.download_url().unwrap().as_str(),
    ///     "https://unsplash.com/photos/yC-Yzbqy7PY/download"
    /// );
    /// ```
    pub fn download_url(&self) -> Result<Url> {
        let raw = format!("{}{}", self.post_url, DOWNLOAD_SUFFIX);
        Url::parse(&raw)
            .map_err(|e| Error::InvalidUrl(format!("The url \"{}\" cannot be parsed: {}", raw, e)))
    }

    /// Location of the image once downloaded into `directory`.
    pub fn target(&self, directory: &Path) -> PathBuf {
        directory.join(&self.filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTRY: &str = r#"{
        "format": "jpeg",
        "width": 5616,
        "height": 3744,
        "filename": "0001_LNRyGwIJr5c.jpeg",
        "id": 1,
        "author": "Alejandro Escamilla",
        "author_url": "https://unsplash.com/@alejandroescamilla",
        "post_url": "https://unsplash.com/photos/LNRyGwIJr5c"
    }"#;

    #[test]
    fn test_decode_entry() {
        let d: Descriptor = serde_json::from_str(ENTRY).unwrap();
        assert_eq!(d.id, 1);
        assert_eq!(d.filename, "0001_LNRyGwIJr5c.jpeg");
        assert_eq!(d.width, 5616);
        assert_eq!(d.height, 3744);
    }

    #[test]
    fn test_download_url_appends_suffix() {
        let d: Descriptor = serde_json::from_str(ENTRY).unwrap();
        assert_eq!(
            d.download_url().unwrap().as_str(),
            "https://unsplash.com/photos/LNRyGwIJr5c/download"
        );
    }

    #[test]
    fn test_download_url_rejects_relative_post_url() {
        let mut d: Descriptor = serde_json::from_str(ENTRY).unwrap();
        d.post_url = "photos/LNRyGwIJr5c".into();
        assert!(matches!(d.download_url(), Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_target_joins_filename() {
        let d: Descriptor = serde_json::from_str(ENTRY).unwrap();
        assert_eq!(
            d.target(Path::new("images")),
            PathBuf::from("images/0001_LNRyGwIJr5c.jpeg")
        );
    }
}
