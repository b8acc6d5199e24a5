//! Structured error handling for listing operations.

use hipstr::HipStr;
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};
use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of errors that can occur in listing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// A query argument was out of its valid domain (e.g. a negative offset).
    ///
    /// Raised before the collection is touched.
    InvalidArgument,
    /// The operation shape is not part of the paging contract.
    ///
    /// Covers single-item lookups, free-form selections and every mutation.
    Unsupported,
    /// The backing enumeration failed (I/O, backing store).
    ///
    /// Recoverable: the next progress signal retries the same window.
    TransientFetchFailure,
}

impl ErrorKind {
    /// Check if this error kind is typically retryable.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::TransientFetchFailure)
    }
}

/// Structured error type with classification and context tracking.
#[must_use]
#[derive(Debug, Error)]
#[error("[{kind}]{}", message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Primary error message.
    pub message: Option<HipStr<'static>>,
    /// Underlying source error, if any.
    #[source]
    pub source: Option<BoxedError>,
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            source: None,
        }
    }

    /// Creates a new error from a source error.
    pub fn from_source(kind: ErrorKind, source: impl Into<BoxedError>) -> Self {
        Self {
            kind,
            message: None,
            source: Some(source.into()),
        }
    }

    /// Creates an invalid argument error with a message.
    pub fn invalid_argument(message: impl Into<HipStr<'static>>) -> Self {
        Self::new(ErrorKind::InvalidArgument).with_message(message)
    }

    /// Creates an unsupported operation error naming the operation.
    pub fn unsupported(operation: impl Into<HipStr<'static>>) -> Self {
        Self::new(ErrorKind::Unsupported).with_message(operation)
    }

    /// Creates a transient fetch failure with a message.
    pub fn transient(message: impl Into<HipStr<'static>>) -> Self {
        Self::new(ErrorKind::TransientFetchFailure).with_message(message)
    }

    /// Adds a message to this error.
    pub fn with_message(mut self, message: impl Into<HipStr<'static>>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the source of the error.
    pub fn with_source(mut self, source: impl Into<BoxedError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Check if this error is retryable based on its kind.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::from_source(ErrorKind::TransientFetchFailure, error)
            .with_message("enumeration failed")
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn error_builder_pattern() {
        let error = Error::new(ErrorKind::InvalidArgument).with_message("offset must be >= 0");

        assert_eq!(error.kind(), ErrorKind::InvalidArgument);
        assert_eq!(error.message.as_deref(), Some("offset must be >= 0"));
        assert!(error.source.is_none());
    }

    #[test]
    fn error_display() {
        let error = Error::unsupported("insert");
        let display = error.to_string();
        assert!(display.contains("unsupported"));
        assert!(display.contains("insert"));

        let bare = Error::new(ErrorKind::TransientFetchFailure);
        assert_eq!(bare.to_string(), "[transient_fetch_failure]");
    }

    #[test]
    fn io_errors_are_transient() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory");
        let error = Error::from(io_error);

        assert_eq!(error.kind, ErrorKind::TransientFetchFailure);
        assert!(error.is_retryable());
        assert!(error.source.is_some());
    }

    #[test]
    fn only_transient_failures_are_retryable() {
        assert!(ErrorKind::TransientFetchFailure.is_retryable());
        assert!(!ErrorKind::InvalidArgument.is_retryable());
        assert!(!ErrorKind::Unsupported.is_retryable());
    }

    #[test]
    fn kind_from_str() {
        assert_eq!(
            ErrorKind::from_str("invalid_argument").unwrap(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            ErrorKind::from_str("unsupported").unwrap(),
            ErrorKind::Unsupported
        );
        assert!(ErrorKind::from_str("not_found").is_err());
    }
}
