#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod client;
mod config;
mod error;
mod event;
mod generation;
mod session;
mod view;

pub use client::PagingClient;
pub use config::PagingConfig;
pub use error::{Error, Result};
pub use event::{FetchedRange, PagingEvent, PagingEvents};
pub use generation::{FetchPhase, FetchTicket, FetchTracker, FetchWindow, Generation};
pub use session::{Completion, PagingSession, Signal};
pub use view::{MergeOutcome, Slot, ViewSnapshot, ViewState};

/// Tracing target for the paging client.
pub const TRACING_TARGET: &str = "folio_client";
