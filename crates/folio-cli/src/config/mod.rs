//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── directory: DirectoryConfig    # Root directory, hidden files
//! ├── paging: PagingConfig          # Page size, strict paging
//! └── simulation: SimulationConfig  # Scroll step, output formats
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.

mod simulation;

use std::process;

use anyhow::Context;
use clap::Parser;
use folio_client::PagingConfig;
use folio_provider::DirectoryConfig;
use serde::{Deserialize, Serialize};
pub use simulation::{LogFormat, SimulationConfig};

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "folio")]
#[command(about = "Pages through a directory listing like a scrolling list")]
#[command(version)]
pub struct Cli {
    /// Directory listing configuration.
    #[clap(flatten)]
    pub directory: DirectoryConfig,

    /// Paging session configuration.
    #[clap(flatten)]
    pub paging: PagingConfig,

    /// Simulated consumer configuration.
    #[clap(flatten)]
    pub simulation: SimulationConfig,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.directory
            .validate()
            .context("invalid directory configuration")?;
        self.paging
            .validate()
            .context("invalid paging configuration")?;
        self.simulation
            .validate()
            .context("invalid simulation configuration")?;
        Ok(())
    }

    /// Logs build information and configuration.
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            root = %self.directory.root.display(),
            include_hidden = self.directory.include_hidden,
            page_size = self.paging.page_size,
            strict_paging = self.paging.strict_paging,
            "Listing configuration"
        );
        self.simulation.log();
    }

    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn parses_listing_options() {
        let cli = Cli::try_parse_from([
            "folio",
            "--root",
            "/srv/photos",
            "--page-size",
            "20",
            "--scroll-step",
            "3",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.directory.root, PathBuf::from("/srv/photos"));
        assert_eq!(cli.paging.page_size, 20);
        assert!(cli.paging.strict_paging);
        assert_eq!(cli.simulation.scroll_step, 3);
        assert!(cli.simulation.json);
        assert_eq!(cli.simulation.log_format, LogFormat::Text);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn strict_paging_can_be_disabled() {
        let cli = Cli::try_parse_from(["folio", "--strict-paging", "false", "--log-format", "json"])
            .unwrap();
        assert!(!cli.paging.strict_paging);
        assert_eq!(cli.simulation.log_format, LogFormat::Json);
    }

    #[test]
    fn zero_values_fail_validation() {
        let cli = Cli::try_parse_from(["folio", "--page-size", "0"]).unwrap();
        assert!(cli.validate().is_err());

        let cli = Cli::try_parse_from(["folio", "--scroll-step", "0"]).unwrap();
        assert!(cli.validate().is_err());
    }
}
