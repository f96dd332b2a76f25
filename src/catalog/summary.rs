//! Per-item outcome records.
//!
//! A [`Summary`] is produced by the worker that handled a descriptor and
//! handed to the pool's `on_complete` callback, if any. The completion
//! coordinator never sees summaries, only counts.
//!
//! ```rust
//! use trawl::catalog::{Descriptor, Status, Summary};
//!
//! # fn example(descriptor: Descriptor) {
//! let summary = Summary::new(descriptor, Status::Success, 2);
//! match summary.status() {
//!     Status::Success => println!("got it in {} attempts", summary.attempts()),
//!     Status::Skipped(reason) => println!("skipped: {}", reason),
//!     Status::Fail(msg) => println!("gave up: {}", msg),
//! }
//! # }
//! ```

use super::descriptor::Descriptor;

/// Outcome of processing one descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Every attempt failed; holds the last error's text.
    Fail(String),
    /// No transfer was needed.
    Skipped(String),
    /// The image was written to disk.
    Success,
}

/// Represents a [`Descriptor`] summary.
#[derive(Debug, Clone)]
pub struct Summary {
    descriptor: Descriptor,
    status: Status,
    /// Number of transfer attempts made; zero for skipped items.
    attempts: u32,
}

impl Summary {
    /// Create a new [`Summary`].
    pub fn new(descriptor: Descriptor, status: Status, attempts: u32) -> Self {
        Self {
            descriptor,
            status,
            attempts,
        }
    }

    /// Get a reference to the summary's descriptor.
    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    /// Get a reference to the summary's status.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Get the number of transfer attempts.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}
