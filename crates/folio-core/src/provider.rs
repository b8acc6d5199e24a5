//! The listing provider contract.

use std::sync::Arc;

use crate::types::{ContentType, Item, ItemId, PageRequest, PageResult, Target};
use crate::{Error, Result};

/// Core trait for answering offset/limit queries over an ordered collection.
///
/// Only plain offset/limit enumeration of the whole collection is part of
/// the contract. Every other shape is rejected with an `unsupported` error so
/// that a caller can never mistake it for an empty result:
///
/// - a query addressed at [`Target::Item`] (identity lookup has its own,
///   separately scoped path through [`content_type`](Self::content_type)),
/// - a query carrying a free-form selection,
/// - every mutation ([`insert`](Self::insert), [`update`](Self::update),
///   [`delete`](Self::delete)).
///
/// Implementations must be safe to query concurrently; a query is a pure
/// read over the current collection snapshot.
///
/// # Example
///
/// ```rust,ignore
/// let page = provider
///     .query(&Target::Collection, &PageRequest::new(0, 10))
///     .await?;
/// println!("fetched {} of {}", page.len(), page.total_size);
/// ```
#[async_trait::async_trait]
pub trait ListingProvider: Send + Sync {
    /// Returns the page of the collection selected by `request`.
    async fn query(&self, target: &Target, request: &PageRequest) -> Result<PageResult>;

    /// Resolves the content type of `target`.
    fn content_type(&self, target: &Target) -> Result<ContentType> {
        Ok(ContentType::of(target))
    }

    /// Inserts an item. Not part of the paging contract.
    async fn insert(&self, _target: &Target, _item: Item) -> Result<ItemId> {
        Err(Error::unsupported("insert"))
    }

    /// Updates matching items. Not part of the paging contract.
    async fn update(&self, _target: &Target, _item: Item) -> Result<u64> {
        Err(Error::unsupported("update"))
    }

    /// Deletes matching items. Not part of the paging contract.
    async fn delete(&self, _target: &Target) -> Result<u64> {
        Err(Error::unsupported("delete"))
    }
}

#[async_trait::async_trait]
impl<P> ListingProvider for Arc<P>
where
    P: ListingProvider + ?Sized,
{
    async fn query(&self, target: &Target, request: &PageRequest) -> Result<PageResult> {
        (**self).query(target, request).await
    }

    fn content_type(&self, target: &Target) -> Result<ContentType> {
        (**self).content_type(target)
    }

    async fn insert(&self, target: &Target, item: Item) -> Result<ItemId> {
        (**self).insert(target, item).await
    }

    async fn update(&self, target: &Target, item: Item) -> Result<u64> {
        (**self).update(target, item).await
    }

    async fn delete(&self, target: &Target) -> Result<u64> {
        (**self).delete(target).await
    }
}

/// Rejects any target other than the whole collection.
///
/// Providers call this first in [`ListingProvider::query`] so that identity
/// lookups never reach the paging code path.
pub fn require_collection(target: &Target) -> Result<()> {
    match target {
        Target::Collection => Ok(()),
        Target::Item(id) => Err(Error::unsupported(format!(
            "single-item query for {id} is not part of the paged listing"
        ))),
    }
}
