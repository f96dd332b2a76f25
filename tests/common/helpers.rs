#![allow(dead_code)]

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use trawl::pool::{Fetch, PoolBuilder};
use trawl::{Descriptor, Error, Result, Summary};

pub const TEST_BODY: &[u8] = b"\xff\xd8\xff\xe0 not really a jpeg";

/// Creates a temporary output directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Creates a file in `dir` as if a previous run had downloaded it
pub fn create_existing_image(dir: &Path, filename: &str) -> PathBuf {
    let path = dir.join(filename);
    fs::write(&path, TEST_BODY).expect("Failed to write existing image");
    path
}

/// Asserts that a file exists at the given path
pub fn assert_file_exists(path: &Path) {
    assert!(path.exists(), "File should exist at path: {:?}", path);
}

// === Descriptor Helpers ===

/// Creates a descriptor whose download endpoint hangs off `base`
pub fn create_test_descriptor(base: &str, id: u64) -> Descriptor {
    Descriptor {
        id,
        filename: format!("{:04}_test.jpeg", id),
        format: "jpeg".into(),
        width: 640,
        height: 480,
        author: "Test Author".into(),
        author_url: format!("{}/@author{}", base, id),
        post_url: format!("{}/photos/{}", base, id),
    }
}

/// Creates `count` descriptors in catalog order
pub fn create_test_descriptors(count: usize) -> Vec<Descriptor> {
    (0..count as u64)
        .map(|id| create_test_descriptor("https://example.com", id))
        .collect()
}

/// Catalog JSON entry matching [`create_test_descriptor`]
pub fn catalog_entry(base: &str, id: u64) -> Value {
    let d = create_test_descriptor(base, id);
    json!({
        "format": d.format,
        "width": d.width,
        "height": d.height,
        "filename": d.filename,
        "id": d.id,
        "author": d.author,
        "author_url": d.author_url,
        "post_url": d.post_url,
    })
}

/// Catalog JSON array of `count` entries
pub fn catalog_body(base: &str, count: usize) -> Value {
    Value::Array((0..count as u64).map(|id| catalog_entry(base, id)).collect())
}

// === Pool Helpers ===

/// Creates a pool builder writing into `dir` with hidden progress
pub fn create_test_pool_builder(dir: &Path) -> PoolBuilder {
    PoolBuilder::hidden().directory(dir.to_path_buf())
}

/// Collects every summary the pool reports
#[derive(Clone, Default)]
pub struct SummaryLog(Arc<Mutex<Vec<Summary>>>);

impl SummaryLog {
    pub fn attach(&self, builder: PoolBuilder) -> PoolBuilder {
        let log = self.0.clone();
        builder.on_complete(move |summary| log.lock().unwrap().push(summary.clone()))
    }

    pub fn summaries(&self) -> Vec<Summary> {
        self.0.lock().unwrap().clone()
    }
}

/// In-memory log sink for a `tracing` subscriber
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    /// Subscriber writing plain INFO-and-above lines into this buffer
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync {
        let buffer = self.clone();
        tracing_subscriber::fmt()
            .with_writer(move || buffer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// Number of captured lines containing `needle`
    pub fn count_lines(&self, needle: &str) -> usize {
        self.contents().lines().filter(|l| l.contains(needle)).count()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// === Fetch Doubles ===

/// Instrumented fetcher: counts calls and concurrency, writes the target on
/// success, and fails the configured filenames a set number of times.
#[derive(Default)]
pub struct MockFetcher {
    delay: Duration,
    /// Filename -> number of leading attempts that fail. `u32::MAX` never succeeds.
    failures: HashMap<String, u32>,
    attempts: Mutex<HashMap<String, u32>>,
    order: Mutex<Vec<u64>>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn always_failing(mut self, filename: &str) -> Self {
        self.failures.insert(filename.to_string(), u32::MAX);
        self
    }

    pub fn failing_first(mut self, filename: &str, attempts: u32) -> Self {
        self.failures.insert(filename.to_string(), attempts);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn attempts(&self, filename: &str) -> u32 {
        self.attempts
            .lock()
            .unwrap()
            .get(filename)
            .copied()
            .unwrap_or(0)
    }

    pub fn order(&self) -> Vec<u64> {
        self.order.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetch for MockFetcher {
    async fn fetch(&self, descriptor: &Descriptor, target: &Path) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.order.lock().unwrap().push(descriptor.id);
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            let n = attempts.entry(descriptor.filename.clone()).or_insert(0);
            *n += 1;
            *n
        };

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let failing = self
            .failures
            .get(&descriptor.filename)
            .is_some_and(|&n| attempt <= n);
        if failing {
            return Err(Error::Http {
                status: StatusCode::SERVICE_UNAVAILABLE,
                url: descriptor.download_url()?.to_string(),
            });
        }

        tokio::fs::write(target, TEST_BODY).await?;
        Ok(())
    }
}

/// Filenames of `descriptors`, as a set
pub fn filenames(descriptors: &[Descriptor]) -> HashSet<String> {
    descriptors.iter().map(|d| d.filename.clone()).collect()
}
