//! Progress bar display for a run.

use crate::progress::ProgressBarOpts;
use indicatif::{MultiProgress, ProgressBar};

/// Tracks processed descriptors on a single bar.
///
/// Cloning is cheap and every clone drives the same bar, so each worker
/// holds its own handle.
#[derive(Clone)]
pub struct ProgressDisplay {
    bar: ProgressBar,
    clear: bool,
}

impl ProgressDisplay {
    /// Create a bar sized to the number of descriptors in the run.
    ///
    /// A visible bar is attached to `target` when one is given, so log
    /// output written through the same [`MultiProgress`] stays off it.
    pub fn new(opts: ProgressBarOpts, total: usize, target: Option<&MultiProgress>) -> Self {
        let clear = opts.clear;
        let enabled = opts.enabled;
        let mut bar = opts.to_progress_bar(total as u64);
        if let (true, Some(multi)) = (enabled, target) {
            bar = multi.add(bar);
        }
        bar.tick();
        Self { bar, clear }
    }

    /// Record one processed descriptor.
    pub fn item_done(&self, filename: &str) {
        self.bar.set_message(filename.to_string());
        self.bar.inc(1);
    }

    /// Number of descriptors recorded so far.
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Finish the bar, clearing or keeping it based on configuration.
    pub fn finish(&self) {
        if self.clear {
            self.bar.finish_and_clear();
        } else {
            self.bar.abandon();
        }
    }
}
