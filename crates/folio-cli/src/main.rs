#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod scroll;
mod telemetry;

use std::process;

use anyhow::Context;
use folio_provider::DirectoryProvider;

use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "folio_cli::startup";
pub const TRACING_TARGET_SHUTDOWN: &str = "folio_cli::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "folio_cli::config";
pub const TRACING_TARGET_SCROLL: &str = "folio_cli::scroll";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %error,
            "folio terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    telemetry::init_tracing(cli.simulation.log_format)?;
    cli.log();
    cli.validate()?;

    let provider =
        DirectoryProvider::new(cli.directory.clone()).context("failed to open directory")?;
    let report = scroll::scroll_through(provider, cli.paging.clone(), cli.simulation.scroll_step)
        .await
        .with_context(|| format!("failed to page through {}", cli.directory.root.display()))?;

    tracing::info!(
        target: TRACING_TARGET_SHUTDOWN,
        fetches = report.ranges.len(),
        fetched = report.snapshot.fetched_count(),
        total_size = ?report.snapshot.total_size,
        "Reached the end of the list"
    );

    if cli.simulation.json {
        let json = serde_json::to_string_pretty(&report.snapshot)
            .context("failed to serialize view snapshot")?;
        println!("{json}");
    }

    Ok(())
}
