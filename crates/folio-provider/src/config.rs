//! Directory provider configuration.

use std::path::PathBuf;

#[cfg(feature = "config")]
use clap::Args;
use folio_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Configuration for [`DirectoryProvider`].
///
/// [`DirectoryProvider`]: crate::DirectoryProvider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct DirectoryConfig {
    /// Directory whose regular files make up the collection.
    #[cfg_attr(feature = "config", arg(long = "root", env = "FOLIO_ROOT", default_value = "."))]
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Whether hidden files (names starting with a dot) are listed.
    #[cfg_attr(feature = "config", arg(long = "include-hidden", env = "FOLIO_INCLUDE_HIDDEN"))]
    #[serde(default)]
    pub include_hidden: bool,
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

impl DirectoryConfig {
    /// Creates a configuration listing `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            include_hidden: false,
        }
    }

    /// Returns a configuration that also lists hidden files.
    pub fn with_hidden(mut self) -> Self {
        self.include_hidden = true;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `invalid_argument` for an empty root path.
    pub fn validate(&self) -> Result<()> {
        if self.root.as_os_str().is_empty() {
            return Err(Error::invalid_argument("directory root must not be empty"));
        }
        Ok(())
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self::new(default_root())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_lists_current_directory() {
        let config = DirectoryConfig::default();
        assert_eq!(config.root, PathBuf::from("."));
        assert!(!config.include_hidden);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_root_is_invalid() {
        assert!(DirectoryConfig::new("").validate().is_err());
    }
}
