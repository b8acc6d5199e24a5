//! Notifications pushed to the consumer of a paging session.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Range of items appended to the view by one fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedRange {
    /// Index of the first appended item.
    pub start: usize,
    /// Number of appended items.
    pub count: usize,
    /// Total size reported by the provider.
    pub total_size: u64,
}

impl FetchedRange {
    /// Creates a fetched range.
    pub const fn new(start: usize, count: usize, total_size: u64) -> Self {
        Self {
            start,
            count,
            total_size,
        }
    }

    /// Index one past the last appended item.
    #[inline]
    pub const fn end(&self) -> usize {
        self.start + self.count
    }

    /// Renders the range the way it is shown to a user.
    pub fn status_message(&self) -> String {
        format!(
            "Fetched items {} to {} out of {}",
            self.start + 1,
            self.end(),
            self.total_size
        )
    }
}

/// Event emitted by a [`PagingClient`](crate::PagingClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PagingEvent {
    /// New items were appended to the view.
    Fetched(FetchedRange),
}

/// Stream of [`PagingEvent`]s.
///
/// Ends once the session driver has stopped.
pub struct PagingEvents {
    rx: mpsc::UnboundedReceiver<PagingEvent>,
}

impl PagingEvents {
    pub(crate) fn new(rx: mpsc::UnboundedReceiver<PagingEvent>) -> Self {
        Self { rx }
    }

    /// Receives the next event.
    pub async fn recv(&mut self) -> Option<PagingEvent> {
        self.rx.recv().await
    }

    /// Returns the next event if one is ready.
    pub fn try_recv(&mut self) -> Option<PagingEvent> {
        self.rx.try_recv().ok()
    }
}

impl Stream for PagingEvents {
    type Item = PagingEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

impl std::fmt::Debug for PagingEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagingEvents").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use futures::StreamExt;

    use super::*;

    #[test]
    fn status_message_is_one_based() {
        let range = FetchedRange::new(10, 10, 25);
        assert_eq!(range.end(), 20);
        assert_eq!(range.status_message(), "Fetched items 11 to 20 out of 25");
        assert_eq!(
            FetchedRange::new(20, 5, 25).status_message(),
            "Fetched items 21 to 25 out of 25"
        );
    }

    #[test]
    fn event_serializes_tagged() {
        let event = PagingEvent::Fetched(FetchedRange::new(0, 10, 25));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "fetched");
        assert_eq!(json["count"], 10);
    }

    #[tokio::test]
    async fn stream_ends_when_sender_drops() {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut events = PagingEvents::new(rx);

        tx.send(PagingEvent::Fetched(FetchedRange::new(0, 3, 3))).unwrap();
        drop(tx);

        assert!(matches!(events.next().await, Some(PagingEvent::Fetched(_))));
        assert!(events.next().await.is_none());
    }
}
