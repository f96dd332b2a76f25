use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use trawl::catalog::DEFAULT_CATALOG_URL;
use trawl::pool::{Backoff, PoolBuilder};
use trawl::progress::ProgressBarOpts;
use trawl::HttpClientConfig;

#[derive(Parser, Debug)]
#[command(name = "trawl")]
#[command(about = "Download every image listed by a remote catalog", long_about = None)]
pub struct Cli {
    /// Number of workers running at any point
    #[arg(short = 'w', long = "workers", alias = "num-workers", default_value_t = 3)]
    pub workers: usize,

    /// Number of attempts per image before giving up on it
    #[arg(short = 'r', long = "retries", alias = "num-retries", default_value_t = 3)]
    pub retries: u32,

    /// Seconds a worker waits for work before exiting
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Catalog endpoint
    #[arg(long, default_value = DEFAULT_CATALOG_URL)]
    pub catalog_url: String,

    /// Existing directory the images are written to
    #[arg(long, default_value = "images")]
    pub directory: PathBuf,

    /// Overall timeout for a single HTTP request, in seconds
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u64).range(1..))]
    pub http_timeout: u64,

    /// Wait a jittered, growing delay between attempts on the same image
    #[arg(long)]
    pub backoff: bool,

    /// Hide the progress bar
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            timeout: Duration::from_secs(self.http_timeout),
            ..HttpClientConfig::default()
        }
    }

    pub fn pool_builder(&self) -> PoolBuilder {
        let mut builder = PoolBuilder::new()
            .directory(self.directory.clone())
            .workers(self.workers)
            .retries(self.retries)
            .idle_timeout(Duration::from_secs(self.timeout));
        if self.backoff {
            builder = builder.backoff(Backoff::default());
        }
        if self.quiet {
            builder = builder.progress(ProgressBarOpts::hidden());
        }
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["trawl"]);
        assert_eq!(cli.workers, 3);
        assert_eq!(cli.retries, 3);
        assert_eq!(cli.timeout, 60);
        assert_eq!(cli.catalog_url, DEFAULT_CATALOG_URL);
        assert_eq!(cli.directory, PathBuf::from("images"));
        assert!(!cli.backoff);
    }

    #[test]
    fn test_short_flags_bind_their_own_option() {
        let cli = Cli::parse_from(["trawl", "-w", "5", "-r", "1"]);
        assert_eq!(cli.workers, 5);
        assert_eq!(cli.retries, 1);
    }

    #[test]
    fn test_long_aliases() {
        let cli = Cli::parse_from(["trawl", "--num-workers", "4", "--num-retries", "2"]);
        assert_eq!(cli.workers, 4);
        assert_eq!(cli.retries, 2);
    }

    #[test]
    fn test_pool_builder_carries_options() {
        let cli = Cli::parse_from(["trawl", "--timeout", "5", "--backoff", "--quiet"]);
        let builder = cli.pool_builder();
        let config = builder.config();
        assert_eq!(config.idle_timeout, Duration::from_secs(5));
        assert!(config.backoff.is_some());
        assert!(!config.progress.is_enabled());
    }

    #[test]
    fn test_zero_timeouts_rejected() {
        assert!(Cli::try_parse_from(["trawl", "--http-timeout", "0"]).is_err());
        assert!(Cli::try_parse_from(["trawl", "--timeout", "0"]).is_err());

        let cli = Cli::parse_from(["trawl", "--http-timeout", "1"]);
        assert_eq!(cli.http_config().timeout, Duration::from_secs(1));
        assert!(cli.http_config().validate().is_ok());
    }
}
