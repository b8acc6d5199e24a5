//! Scroll simulation configuration.

use anyhow::{Result as AnyhowResult, anyhow};
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// Output format of log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// How the simulated consumer moves through the list.
///
/// # Environment Variables
///
/// - `FOLIO_SCROLL_STEP` - Rows the read position advances per step (default: 5, min: 1)
/// - `FOLIO_JSON` - Print the final view as JSON on stdout
/// - `FOLIO_LOG_FORMAT` - `text` or `json` (default: text)
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct SimulationConfig {
    /// Rows the read position advances per step.
    #[arg(long = "scroll-step", env = "FOLIO_SCROLL_STEP", default_value_t = 5)]
    #[serde(default = "default_scroll_step")]
    pub scroll_step: usize,

    /// Print the final view snapshot as JSON.
    #[arg(long, env = "FOLIO_JSON")]
    #[serde(default)]
    pub json: bool,

    /// Format of log output on stderr.
    #[arg(long = "log-format", env = "FOLIO_LOG_FORMAT", value_enum, default_value = "text")]
    #[serde(default)]
    pub log_format: LogFormat,
}

const fn default_scroll_step() -> usize {
    5
}

impl SimulationConfig {
    /// Validates the simulation parameters.
    pub fn validate(&self) -> AnyhowResult<()> {
        if self.scroll_step == 0 {
            return Err(anyhow!("scroll step must be at least 1"));
        }
        Ok(())
    }

    /// Logs the simulation parameters.
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            scroll_step = self.scroll_step,
            json = self.json,
            log_format = ?self.log_format,
            "Simulation configuration"
        );
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            scroll_step: default_scroll_step(),
            json: false,
            log_format: LogFormat::default(),
        }
    }
}
