//! Configuration for the worker pool.
//!
//! A [`PoolConfig`] is built once before the run, validated, and shared
//! read-only with every worker. Nothing in the pool reads process-wide
//! state.

use crate::catalog::Summary;
use crate::error::{Error, Result};
use crate::progress::ProgressBarOpts;

use indicatif::MultiProgress;
use reqwest_retry::policies::ExponentialBackoff;
use reqwest_retry::{Jitter, RetryDecision, RetryPolicy};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

/// Callback invoked once per processed descriptor.
pub type CompletionCallback = Box<dyn Fn(&Summary) + Send + Sync>;

/// Jittered exponential delay between two attempts on the same descriptor.
///
/// Without a backoff, attempts follow each other immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    /// Delay before the second attempt, before jitter.
    pub min: Duration,
    /// Upper bound on any single delay.
    pub max: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            min: Duration::from_millis(500),
            max: Duration::from_secs(10),
        }
    }
}

impl Backoff {
    /// Delay to wait after `past_attempts` failed attempts.
    pub fn delay(&self, past_attempts: u32) -> Duration {
        let policy = ExponentialBackoff::builder()
            .retry_bounds(self.min, self.max)
            .jitter(Jitter::Bounded)
            .build_with_max_retries(u32::MAX);

        match policy.should_retry(SystemTime::now(), past_attempts) {
            RetryDecision::Retry { execute_after } => execute_after
                .duration_since(SystemTime::now())
                .unwrap_or_default(),
            RetryDecision::DoNotRetry => Duration::ZERO,
        }
    }
}

/// Configuration structure for the worker pool.
#[derive(Clone)]
pub struct PoolConfig {
    /// Number of workers, which is also the queue capacity.
    pub workers: usize,
    /// Maximum transfer attempts per descriptor.
    pub retries: u32,
    /// How long a worker waits for a descriptor before exiting for good.
    pub idle_timeout: Duration,
    /// Directory the images are written to. It must already exist.
    pub directory: PathBuf,
    /// Optional delay between attempts.
    pub backoff: Option<Backoff>,
    /// Progress bar options.
    pub progress: ProgressBarOpts,
    /// Bars the progress bar is drawn with, shared with log output.
    pub progress_target: Option<MultiProgress>,
    /// Callback for when each descriptor is processed.
    pub on_complete: Option<Arc<CompletionCallback>>,
}

impl std::fmt::Debug for PoolConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoolConfig")
            .field("workers", &self.workers)
            .field("retries", &self.retries)
            .field("idle_timeout", &self.idle_timeout)
            .field("directory", &self.directory)
            .field("backoff", &self.backoff)
            .field("progress", &self.progress)
            .field("progress_target", &self.progress_target.is_some())
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: 3,
            retries: 3,
            idle_timeout: Duration::from_secs(60),
            directory: PathBuf::from("images"),
            backoff: None,
            progress: ProgressBarOpts::default(),
            progress_target: None,
            on_complete: None,
        }
    }
}

impl PoolConfig {
    /// Rejects configurations a run cannot start with.
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::Config("at least one worker is required".into()));
        }
        if self.retries == 0 {
            return Err(Error::Config("at least one attempt is required".into()));
        }
        if self.idle_timeout.is_zero() {
            return Err(Error::Config("the idle timeout must be positive".into()));
        }
        if let Some(backoff) = self.backoff {
            if backoff.min > backoff.max {
                return Err(Error::Config(format!(
                    "backoff minimum {:?} exceeds maximum {:?}",
                    backoff.min, backoff.max
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PoolConfig::default();
        assert_eq!(config.workers, 3);
        assert_eq!(config.retries, 3);
        assert_eq!(config.idle_timeout, Duration::from_secs(60));
        assert_eq!(config.directory, PathBuf::from("images"));
        assert!(config.backoff.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_workers() {
        let config = PoolConfig {
            workers: 0,
            ..PoolConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_retries() {
        let config = PoolConfig {
            retries: 0,
            ..PoolConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_inverted_backoff() {
        let config = PoolConfig {
            backoff: Some(Backoff {
                min: Duration::from_secs(2),
                max: Duration::from_secs(1),
            }),
            ..PoolConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_backoff_delay_is_bounded() {
        let backoff = Backoff {
            min: Duration::from_millis(10),
            max: Duration::from_millis(40),
        };
        for past_attempts in 0..6 {
            assert!(backoff.delay(past_attempts) <= Duration::from_millis(40));
        }
    }

    #[test]
    fn test_debug_hides_callback() {
        let config = PoolConfig {
            on_complete: Some(Arc::new(Box::new(|_| {}))),
            ..PoolConfig::default()
        };
        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("on_complete: true"));
    }
}
