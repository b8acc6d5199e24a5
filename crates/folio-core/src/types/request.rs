//! Offset/limit page requests.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Offset/limit parameters of a single page query.
///
/// Both arguments are optional: an absent offset starts at the beginning of
/// the collection and an absent limit returns everything from the offset
/// onward. Arguments are signed so that a negative value reaches the
/// provider and is rejected instead of being clamped on the way in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Index of the first item to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    /// Maximum number of items to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    /// Free-form selection clause.
    ///
    /// Not part of the paging contract; a provider rejects any request that
    /// carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<String>,
}

impl PageRequest {
    /// Default offset applied when none was supplied.
    pub const DEFAULT_OFFSET: u64 = 0;

    /// Returns a request carrying both an offset and a limit.
    #[inline]
    pub fn new(offset: i64, limit: i64) -> Self {
        Self {
            offset: Some(offset),
            limit: Some(limit),
            selection: None,
        }
    }

    /// Returns a request with the given offset.
    #[inline]
    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Returns a request with the given limit.
    #[inline]
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns a request with a free-form selection attached.
    #[inline]
    pub fn with_selection(mut self, selection: impl Into<String>) -> Self {
        self.selection = Some(selection.into());
        self
    }

    /// Validates the arguments and resolves their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidArgument`] when the offset or the limit is
    /// negative, and [`ErrorKind::Unsupported`] when a selection is present.
    ///
    /// [`ErrorKind::InvalidArgument`]: crate::ErrorKind::InvalidArgument
    /// [`ErrorKind::Unsupported`]: crate::ErrorKind::Unsupported
    pub fn bounds(&self) -> Result<PageBounds> {
        if self.selection.is_some() {
            return Err(Error::unsupported("selection queries are not supported"));
        }

        let offset = match self.offset {
            Some(offset) if offset < 0 => {
                return Err(Error::invalid_argument(format!(
                    "offset must not be less than 0, got {offset}"
                )));
            }
            Some(offset) => offset as u64,
            None => Self::DEFAULT_OFFSET,
        };

        let limit = match self.limit {
            Some(limit) if limit < 0 => {
                return Err(Error::invalid_argument(format!(
                    "limit must not be less than 0, got {limit}"
                )));
            }
            Some(limit) => Some(limit as u64),
            None => None,
        };

        Ok(PageBounds { offset, limit })
    }
}

/// Validated, defaulted bounds of a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    /// Index of the first item to return.
    pub offset: u64,
    /// Maximum number of items to return; `None` is unbounded.
    pub limit: Option<u64>,
}

impl PageBounds {
    /// Returns the half-open index range these bounds select from a
    /// collection of `len` items.
    pub fn range(&self, len: usize) -> std::ops::Range<usize> {
        let start = usize::try_from(self.offset).unwrap_or(usize::MAX).min(len);
        let end = match self.limit {
            Some(limit) => start
                .saturating_add(usize::try_from(limit).unwrap_or(usize::MAX))
                .min(len),
            None => len,
        };
        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn defaults_when_arguments_are_absent() {
        let bounds = PageRequest::default().bounds().unwrap();
        assert_eq!(bounds.offset, 0);
        assert_eq!(bounds.limit, None);
        assert_eq!(bounds.range(7), 0..7);
    }

    #[test]
    fn negative_arguments_are_rejected() {
        let error = PageRequest::new(-1, 10).bounds().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidArgument);

        let error = PageRequest::new(0, -5).bounds().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn selection_is_unsupported() {
        let request = PageRequest::new(0, 10).with_selection("name LIKE '%cat%'");
        let error = request.bounds().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Unsupported);
    }

    #[test]
    fn range_is_clamped_to_collection() {
        let bounds = PageRequest::new(20, 10).bounds().unwrap();
        assert_eq!(bounds.range(25), 20..25);
        assert_eq!(bounds.range(15), 15..15);

        let bounds = PageRequest::new(0, 0).bounds().unwrap();
        assert!(bounds.range(25).is_empty());

        let bounds = PageRequest::new(i64::MAX, i64::MAX).bounds().unwrap();
        assert!(bounds.range(25).is_empty());
    }
}
