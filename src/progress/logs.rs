//! Log output that shares the terminal with the progress bar.
//!
//! Bars are drawn on stderr, and so are log lines. Each log write hides the
//! bars, writes the line, and redraws them, so the two never end up on the
//! same terminal row.
//!
//! ```rust,no_run
//! use indicatif::MultiProgress;
//! use trawl::progress::ProgressLogs;
//!
//! let multi = MultiProgress::new();
//! tracing_subscriber::fmt()
//!     .with_writer(ProgressLogs::new(multi.clone()))
//!     .init();
//! ```

use indicatif::MultiProgress;
use std::io::{self, Write};
use tracing_subscriber::fmt::MakeWriter;

/// A [`MakeWriter`] sending log lines to stderr around the given bars.
#[derive(Clone)]
pub struct ProgressLogs {
    multi: MultiProgress,
}

impl ProgressLogs {
    /// Create log output for the bars attached to `multi`.
    pub fn new(multi: MultiProgress) -> Self {
        Self { multi }
    }
}

impl<'a> MakeWriter<'a> for ProgressLogs {
    type Writer = SuspendingWriter<io::Stderr>;

    fn make_writer(&'a self) -> Self::Writer {
        SuspendingWriter::new(self.multi.clone(), io::stderr())
    }
}

/// Writes to `inner` while the bars of a [`MultiProgress`] are hidden.
pub struct SuspendingWriter<W> {
    multi: MultiProgress,
    inner: W,
}

impl<W: Write> SuspendingWriter<W> {
    /// Wrap `inner`.
    pub fn new(multi: MultiProgress, inner: W) -> Self {
        Self { multi, inner }
    }

    /// Unwrap the inner writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for SuspendingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let inner = &mut self.inner;
        self.multi.suspend(|| inner.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        let inner = &mut self.inner;
        self.multi.suspend(|| inner.flush())
    }
}
