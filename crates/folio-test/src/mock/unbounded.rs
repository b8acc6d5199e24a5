//! Provider that ignores the requested limit.

use folio_core::{HonoredArgs, ListingProvider, PageRequest, PageResult, QueryArg, Result, Target};

/// Answers every query with everything from the offset onwards.
///
/// The result reports the limit as not honored.
#[derive(Debug, Clone)]
pub struct UnboundedProvider<P> {
    inner: P,
}

impl<P> UnboundedProvider<P> {
    /// Wraps `inner`.
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

#[async_trait::async_trait]
impl<P: ListingProvider> ListingProvider for UnboundedProvider<P> {
    async fn query(&self, target: &Target, request: &PageRequest) -> Result<PageResult> {
        let widened = PageRequest {
            limit: None,
            ..request.clone()
        };
        let mut page = self.inner.query(target, &widened).await?;
        page.honored = HonoredArgs::supplied_by(request).without(QueryArg::Limit);
        Ok(page)
    }
}
