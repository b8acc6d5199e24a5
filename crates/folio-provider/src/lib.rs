#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod directory;
mod memory;

pub use config::DirectoryConfig;
pub use directory::DirectoryProvider;
pub use memory::MemoryProvider;

/// Tracing target for provider operations.
pub const TRACING_TARGET: &str = "folio_provider";
