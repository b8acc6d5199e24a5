//! Provider that fails a fixed number of queries.

use std::sync::atomic::{AtomicUsize, Ordering};

use folio_core::{Error, ListingProvider, PageRequest, PageResult, Result, Target};

/// Fails the first `failures` queries with a transient error, then delegates.
#[derive(Debug)]
pub struct FlakyProvider<P> {
    inner: P,
    remaining: AtomicUsize,
    calls: AtomicUsize,
}

impl<P> FlakyProvider<P> {
    /// Wraps `inner`, failing its first `failures` queries.
    pub fn new(inner: P, failures: usize) -> Self {
        Self {
            inner,
            remaining: AtomicUsize::new(failures),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of queries received so far, failed ones included.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl<P: ListingProvider> ListingProvider for FlakyProvider<P> {
    async fn query(&self, target: &Target, request: &PageRequest) -> Result<PageResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let failed = self
            .remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            return Err(Error::transient("simulated enumeration failure"));
        }

        self.inner.query(target, request).await
    }
}
