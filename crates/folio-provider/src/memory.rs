//! In-memory listing provider.

use folio_core::{
    Collection, Item, ListingProvider, PageRequest, PageResult, Result, Target,
    require_collection,
};

use crate::TRACING_TARGET;

/// Listing provider over a fixed, in-memory collection.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    collection: Collection,
}

impl MemoryProvider {
    /// Creates a provider serving `collection`.
    pub fn new(collection: Collection) -> Self {
        Self { collection }
    }

    /// Creates a provider serving `items` in the given order.
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Self {
        Self::new(items.into_iter().collect())
    }

    /// Returns the collection this provider serves.
    pub fn collection(&self) -> &Collection {
        &self.collection
    }
}

#[async_trait::async_trait]
impl ListingProvider for MemoryProvider {
    async fn query(&self, target: &Target, request: &PageRequest) -> Result<PageResult> {
        require_collection(target)?;
        let page = self.collection.page(request)?;

        tracing::debug!(
            target: TRACING_TARGET,
            offset = ?request.offset,
            limit = ?request.limit,
            returned = page.len(),
            total_size = page.total_size,
            "Answered page query"
        );

        Ok(page)
    }
}
