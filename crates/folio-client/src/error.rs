//! Client error types.

use thiserror::Error;

/// Type alias for Results with the client error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors returned by the paging client.
#[derive(Debug, Error)]
pub enum Error {
    /// The session driver has stopped and no longer accepts signals.
    #[error("paging session is closed")]
    Closed,

    /// A listing error surfaced to the caller.
    #[error(transparent)]
    Listing(#[from] folio_core::Error),
}

impl Error {
    /// Returns the listing error kind, if this wraps one.
    pub fn listing_kind(&self) -> Option<folio_core::ErrorKind> {
        match self {
            Self::Closed => None,
            Self::Listing(error) => Some(error.kind()),
        }
    }
}
