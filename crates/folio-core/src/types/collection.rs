//! Ordered, read-only item collections.

use std::sync::Arc;

use super::{HonoredArgs, Item, PageRequest, PageResult};
use crate::Result;

/// An ordered, immutable sequence of items.
///
/// Cloning shares the underlying storage, so a provider can hand the same
/// snapshot to any number of concurrent queries. Order never changes for
/// the lifetime of a value, which is what makes offset paging correct.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    items: Arc<[Item]>,
}

impl Collection {
    /// Creates a collection from items in their enumeration order.
    pub fn new(items: impl Into<Arc<[Item]>>) -> Self {
        Self {
            items: items.into(),
        }
    }

    /// Returns the number of items.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the collection has no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the items as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Item] {
        &self.items
    }

    /// Answers an offset/limit query against this collection.
    ///
    /// An offset at or past the end yields an empty page, not an error. The
    /// returned page always reports the full collection length and honors
    /// exactly the arguments the request supplied.
    ///
    /// # Errors
    ///
    /// Fails with `invalid_argument` for a negative offset or limit and with
    /// `unsupported` for a request carrying a selection.
    pub fn page(&self, request: &PageRequest) -> Result<PageResult> {
        let bounds = request.bounds()?;
        let honored = HonoredArgs::supplied_by(request);
        let total_size = self.items.len() as u64;

        let range = bounds.range(self.items.len());
        let items = self.items[range].to_vec();

        Ok(PageResult::new(items, total_size, honored))
    }
}

impl FromIterator<Item> for Collection {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect::<Vec<_>>())
    }
}

impl From<Vec<Item>> for Collection {
    fn from(items: Vec<Item>) -> Self {
        Self::new(items)
    }
}
