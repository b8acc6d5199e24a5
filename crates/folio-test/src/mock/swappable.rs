//! Provider whose collection can be replaced between queries.

use std::sync::RwLock;

use folio_core::{Collection, Item, ListingProvider, PageRequest, PageResult, Result, Target};
use folio_provider::MemoryProvider;

/// Serves whichever collection it was last given.
///
/// Models a backing store that grows or shrinks while a consumer pages
/// through it.
#[derive(Debug, Default)]
pub struct SwappableProvider {
    current: RwLock<MemoryProvider>,
}

impl SwappableProvider {
    /// Creates a provider serving `items`.
    pub fn new(items: impl IntoIterator<Item = Item>) -> Self {
        Self {
            current: RwLock::new(MemoryProvider::from_items(items)),
        }
    }

    /// Replaces the served collection.
    pub fn replace(&self, items: impl IntoIterator<Item = Item>) {
        let next = MemoryProvider::from_items(items);
        match self.current.write() {
            Ok(mut current) => *current = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
    }

    fn collection(&self) -> Collection {
        match self.current.read() {
            Ok(current) => current.collection().clone(),
            Err(poisoned) => poisoned.into_inner().collection().clone(),
        }
    }
}

#[async_trait::async_trait]
impl ListingProvider for SwappableProvider {
    async fn query(&self, target: &Target, request: &PageRequest) -> Result<PageResult> {
        // The lock guard must not be held across the await.
        let provider = MemoryProvider::new(self.collection());
        provider.query(target, request).await
    }
}
