mod cli;

use clap::Parser;
use cli::Cli;
use color_eyre::eyre::{bail, Result};
use indicatif::{MultiProgress, ProgressDrawTarget};
use tracing::info;
use tracing_subscriber::EnvFilter;
use trawl::progress::ProgressLogs;
use trawl::{create_http_client, fetch_catalog, HttpFetcher};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    // Logs and the bar share stderr; log lines are printed with the bar hidden.
    let multi = if cli.quiet {
        MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
    } else {
        MultiProgress::new()
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(ProgressLogs::new(multi.clone()))
        .init();

    // The output directory is a precondition, not something a run sets up.
    if !cli.directory.is_dir() {
        bail!(trawl::Error::Config(format!(
            "output directory {:?} does not exist",
            cli.directory
        )));
    }

    let http_config = cli.http_config();
    http_config.validate()?;
    let client = create_http_client(http_config)?;
    let descriptors = fetch_catalog(&client, &cli.catalog_url).await?;

    let pool = cli
        .pool_builder()
        .progress_target(multi)
        .build(HttpFetcher::new(client))?;
    let report = pool.run(descriptors).await;

    info!(
        completion = ?report.completion,
        processed = report.processed,
        remaining = report.remaining,
        workers_exited = report.workers_exited,
        "Run finished"
    );

    Ok(())
}
