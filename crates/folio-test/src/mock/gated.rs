//! Provider whose queries wait for the test to release them.

use folio_core::{Error, ListingProvider, PageRequest, PageResult, Result, Target};
use tokio::sync::{mpsc, oneshot};

/// Parks every query until its [`PendingQuery`] is released.
///
/// Lets a test decide when, and in which order, fetches complete.
#[derive(Debug)]
pub struct GatedProvider<P> {
    inner: P,
    queries: mpsc::UnboundedSender<PendingQuery>,
}

/// Receiving side of a [`GatedProvider`].
#[derive(Debug)]
pub struct GateController {
    queries: mpsc::UnboundedReceiver<PendingQuery>,
}

/// A query parked by a [`GatedProvider`].
///
/// Dropping it without releasing fails the query with a transient error.
#[derive(Debug)]
pub struct PendingQuery {
    request: PageRequest,
    release: oneshot::Sender<()>,
}

impl<P> GatedProvider<P> {
    /// Wraps `inner` and returns the controller for its queries.
    pub fn new(inner: P) -> (Self, GateController) {
        let (tx, rx) = mpsc::unbounded_channel();
        let provider = Self { inner, queries: tx };
        (provider, GateController { queries: rx })
    }
}

impl GateController {
    /// Waits for the next parked query.
    ///
    /// Returns `None` once the provider is dropped.
    pub async fn next_query(&mut self) -> Option<PendingQuery> {
        self.queries.recv().await
    }

    /// Returns a parked query if one is waiting.
    pub fn try_next_query(&mut self) -> Option<PendingQuery> {
        self.queries.try_recv().ok()
    }
}

impl PendingQuery {
    /// Returns the request the query was made with.
    pub fn request(&self) -> &PageRequest {
        &self.request
    }

    /// Lets the query proceed to the wrapped provider.
    ///
    /// Returns false if the query was cancelled in the meantime.
    pub fn release(self) -> bool {
        self.release.send(()).is_ok()
    }
}

#[async_trait::async_trait]
impl<P: ListingProvider> ListingProvider for GatedProvider<P> {
    async fn query(&self, target: &Target, request: &PageRequest) -> Result<PageResult> {
        let (tx, rx) = oneshot::channel();
        let pending = PendingQuery {
            request: request.clone(),
            release: tx,
        };
        self.queries
            .send(pending)
            .map_err(|_| Error::transient("gate controller dropped"))?;

        rx.await
            .map_err(|_| Error::transient("query dropped before release"))?;
        self.inner.query(target, request).await
    }
}
