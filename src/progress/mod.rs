//! Progress reporting for a run.
//!
//! A single bar tracks processed descriptors against the catalog length.
//! Log lines still go through `tracing`; when a bar is drawn, the binary
//! routes them through [`ProgressLogs`] so they print above the bar instead
//! of through it. Bars are hidden in tests.
//!
//! ```rust
//! use trawl::progress::ProgressBarOpts;
//!
//! let visible = ProgressBarOpts::default();
//! let hidden = ProgressBarOpts::hidden();
//! assert!(visible.is_enabled());
//! assert!(!hidden.is_enabled());
//! ```

pub(crate) mod display;
pub(crate) mod logs;
pub(crate) mod style;

pub use display::ProgressDisplay;
pub use logs::{ProgressLogs, SuspendingWriter};
pub use style::ProgressBarOpts;
