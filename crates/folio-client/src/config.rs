//! Paging session configuration.

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Configuration of a paging session.
///
/// # Environment Variables
///
/// With the `config` feature enabled, options can be set via:
/// - `FOLIO_PAGE_SIZE` - Items requested per fetch (default: 10, min: 1)
/// - `FOLIO_STRICT_PAGING` - Truncate pages client-side when the provider
///   ignores the limit (default: true)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct PagingConfig {
    /// Number of items requested per fetch.
    #[cfg_attr(
        feature = "config",
        arg(long = "page-size", env = "FOLIO_PAGE_SIZE", default_value_t = 10)
    )]
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Whether oversized pages are truncated to the requested window.
    ///
    /// A provider that does not honor the limit may return more items than
    /// asked for; with strict paging the surplus is dropped before merging.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "strict-paging",
            env = "FOLIO_STRICT_PAGING",
            default_value_t = true,
            action = clap::ArgAction::Set
        )
    )]
    #[serde(default = "default_strict_paging")]
    pub strict_paging: bool,
}

impl PagingConfig {
    /// Default number of items per fetch.
    pub const DEFAULT_PAGE_SIZE: usize = 10;

    /// Creates a configuration with the given page size.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    /// Returns a configuration that merges pages as returned.
    pub fn lenient(mut self) -> Self {
        self.strict_paging = false;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an `invalid_argument` error for a zero page size.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::Listing(folio_core::Error::invalid_argument(
                "page size must be at least 1",
            )));
        }
        Ok(())
    }
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            strict_paging: default_strict_paging(),
        }
    }
}

const fn default_page_size() -> usize {
    PagingConfig::DEFAULT_PAGE_SIZE
}

const fn default_strict_paging() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PagingConfig::default();
        assert_eq!(config.page_size, 10);
        assert!(config.strict_paging);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_page_size_is_invalid() {
        let error = PagingConfig::new(0).validate().unwrap_err();
        assert!(matches!(
            error,
            Error::Listing(ref e) if e.kind() == folio_core::ErrorKind::InvalidArgument
        ));
    }
}
