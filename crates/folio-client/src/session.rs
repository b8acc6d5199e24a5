//! Sans-IO paging session.
//!
//! [`PagingSession`] decides which window to fetch for a progress signal and
//! merges completed fetches into its [`ViewState`]. It performs no I/O; the
//! [`PagingClient`](crate::PagingClient) runs the queries it asks for.

use folio_core::{PageResult, QueryArg};

use crate::event::FetchedRange;
use crate::generation::{FetchPhase, FetchTicket, FetchTracker, FetchWindow};
use crate::view::{MergeOutcome, ViewSnapshot, ViewState};
use crate::{PagingConfig, Result};

/// What a session wants done in response to a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// The position is already covered; nothing to fetch.
    Satisfied,
    /// The same window is already being fetched.
    Coalesced(FetchTicket),
    /// A fetch for `ticket` must be started.
    Dispatch {
        /// Ticket of the new fetch.
        ticket: FetchTicket,
        /// In-flight fetch replaced by this one, which must be cancelled.
        superseded: Option<FetchTicket>,
    },
}

/// Result of handing a finished fetch back to the session.
#[derive(Debug)]
pub enum Completion {
    /// The ticket was superseded; the result was discarded.
    Superseded,
    /// The fetch failed; the view is unchanged.
    Failed {
        /// Error returned by the provider.
        error: folio_core::Error,
    },
    /// New items were appended to the view.
    Merged(FetchedRange),
    /// The fetch added nothing new.
    Empty {
        /// Total size reported by the provider.
        total_size: u64,
    },
    /// The page started past the end of the view and was not merged.
    Discontiguous {
        /// Offset the page started at.
        offset: usize,
        /// Number of items the view holds.
        fetched: usize,
    },
}

/// State machine for a single consumption session.
#[derive(Debug, Clone)]
pub struct PagingSession {
    config: PagingConfig,
    view: ViewState,
    tracker: FetchTracker,
}

impl PagingSession {
    /// Creates an idle session with an empty view.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` does not validate.
    pub fn new(config: PagingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            view: ViewState::new(),
            tracker: FetchTracker::new(),
        })
    }

    /// Returns the session configuration.
    #[inline]
    pub fn config(&self) -> &PagingConfig {
        &self.config
    }

    /// Returns the current view.
    #[inline]
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Returns the fetch phase.
    #[inline]
    pub fn phase(&self) -> FetchPhase {
        self.tracker.phase()
    }

    /// Returns a copy of the view.
    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            items: self.view.items().to_vec(),
            total_size: self.view.total_size(),
            fetching: self.tracker.in_flight().is_some(),
        }
    }

    /// Computes the window to fetch for a read `position`.
    ///
    /// The window covers the page holding `position` but never starts past
    /// the end of the view.
    pub fn window_for(&self, position: usize) -> FetchWindow {
        let page_size = self.config.page_size;
        let page = position / page_size;
        let aligned = page.saturating_mul(page_size);
        let fetched = self.view.fetched_count();

        if aligned > fetched {
            let limit = aligned.saturating_add(page_size) - fetched;
            FetchWindow::new(page, fetched, limit)
        } else {
            FetchWindow::new(page, aligned, page_size)
        }
    }

    /// Requests the first page regardless of position.
    pub fn start(&mut self) -> Signal {
        self.request(self.window_for(0))
    }

    /// Handles a consumption-progress signal.
    pub fn on_progress(&mut self, position: usize) -> Signal {
        if position < self.view.fetched_count() {
            return Signal::Satisfied;
        }
        self.request(self.window_for(position))
    }

    fn request(&mut self, window: FetchWindow) -> Signal {
        if let Some(current) = self.tracker.in_flight()
            && current.window() == window
        {
            return Signal::Coalesced(current);
        }

        let (ticket, superseded) = self.tracker.begin(window);
        Signal::Dispatch { ticket, superseded }
    }

    /// Drops the outstanding fetch, if any.
    pub fn cancel(&mut self) -> Option<FetchTicket> {
        self.tracker.cancel()
    }

    /// Hands the result of the fetch for `ticket` back to the session.
    pub fn complete(
        &mut self,
        ticket: &FetchTicket,
        result: folio_core::Result<PageResult>,
    ) -> Completion {
        if !self.tracker.finish(ticket) {
            return Completion::Superseded;
        }

        let page = match result {
            Ok(page) => page,
            Err(error) => return Completion::Failed { error },
        };

        let window = ticket.window();
        // Without an applied offset the page starts at the head of the collection.
        let offset = if page.honored.contains(QueryArg::Offset) {
            window.offset
        } else {
            0
        };

        let mut items = page.items;
        if self.config.strict_paging && !page.honored.contains(QueryArg::Limit) {
            items.truncate(window.end().saturating_sub(offset));
        }

        match self.view.merge(offset, items, page.total_size) {
            MergeOutcome::Appended { count: 0, .. } => Completion::Empty {
                total_size: page.total_size,
            },
            MergeOutcome::Appended { start, count } => {
                Completion::Merged(FetchedRange::new(start, count, page.total_size))
            }
            MergeOutcome::Gap { offset, fetched } => Completion::Discontiguous { offset, fetched },
        }
    }
}

#[cfg(test)]
mod tests {
    use folio_core::{Collection, HonoredArgs, Item, ItemId};

    use super::*;

    fn collection(len: u64) -> Collection {
        (0..len)
            .map(|i| Item::new(ItemId::new(i), format!("{i:03}.png"), format!("/{i:03}.png"), i))
            .collect()
    }

    fn session(page_size: usize) -> PagingSession {
        PagingSession::new(PagingConfig::new(page_size)).unwrap()
    }

    fn dispatched(signal: Signal) -> FetchTicket {
        match signal {
            Signal::Dispatch { ticket, .. } => ticket,
            other => panic!("expected a dispatch, got {other:?}"),
        }
    }

    fn fetch(collection: &Collection, ticket: &FetchTicket) -> folio_core::Result<PageResult> {
        collection.page(&ticket.window().to_request())
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert!(PagingSession::new(PagingConfig::new(0)).is_err());
    }

    #[test]
    fn signals_fetch_successive_pages() {
        let collection = collection(25);
        let mut session = session(10);
        let mut offsets = Vec::new();

        for position in [9, 19, 24] {
            let ticket = dispatched(session.on_progress(position));
            offsets.push(ticket.window().offset);
            let completion = session.complete(&ticket, fetch(&collection, &ticket));
            assert!(matches!(completion, Completion::Merged(_)));
        }

        assert_eq!(offsets, vec![0, 10, 20]);
        assert_eq!(session.view().fetched_count(), 25);
        assert_eq!(session.view().total_size(), Some(25));
        assert_eq!(session.phase(), FetchPhase::Idle);
    }

    #[test]
    fn last_page_reports_partial_range() {
        let collection = collection(25);
        let mut session = session(10);
        for position in [0, 10] {
            let ticket = dispatched(session.on_progress(position));
            session.complete(&ticket, fetch(&collection, &ticket));
        }

        let ticket = dispatched(session.on_progress(24));
        let Completion::Merged(range) = session.complete(&ticket, fetch(&collection, &ticket)) else {
            panic!("expected a merge");
        };
        assert_eq!(range, FetchedRange::new(20, 5, 25));
    }

    #[test]
    fn covered_positions_are_satisfied() {
        let collection = collection(25);
        let mut session = session(10);
        let ticket = dispatched(session.start());
        session.complete(&ticket, fetch(&collection, &ticket));

        assert_eq!(session.on_progress(3), Signal::Satisfied);
        assert_eq!(session.on_progress(9), Signal::Satisfied);
        assert!(matches!(session.on_progress(10), Signal::Dispatch { .. }));
    }

    #[test]
    fn grown_collection_is_fetched_past_the_old_total() {
        let mut session = session(10);
        let ticket = dispatched(session.start());
        session.complete(&ticket, fetch(&collection(5), &ticket));
        assert!(session.view().is_complete());

        // Three items were added after the first page was fetched.
        let grown = collection(8);
        let ticket = dispatched(session.on_progress(5));
        let completion = session.complete(&ticket, fetch(&grown, &ticket));

        assert!(matches!(completion, Completion::Merged(range) if range == FetchedRange::new(5, 3, 8)));
        assert_eq!(session.view().fetched_count(), 8);
        assert_eq!(session.view().total_size(), Some(8));
    }

    #[test]
    fn empty_collection_is_polled_again() {
        let mut session = session(10);
        let ticket = dispatched(session.start());
        session.complete(&ticket, fetch(&collection(0), &ticket));

        let ticket = dispatched(session.on_progress(0));
        let completion = session.complete(&ticket, fetch(&collection(2), &ticket));
        assert!(matches!(completion, Completion::Merged(range) if range == FetchedRange::new(0, 2, 2)));
    }

    #[test]
    fn empty_collection_completes_empty() {
        let collection = collection(0);
        let mut session = session(10);
        let ticket = dispatched(session.start());

        let completion = session.complete(&ticket, fetch(&collection, &ticket));
        assert!(matches!(completion, Completion::Empty { total_size: 0 }));
        assert_eq!(session.view().total_size(), Some(0));
        assert_eq!(session.view().fetched_count(), 0);
    }

    #[test]
    fn window_is_widened_past_the_view() {
        let collection = collection(40);
        let mut session = session(10);
        let ticket = dispatched(session.start());
        session.complete(&ticket, fetch(&collection, &ticket));

        // Position 35 lies on page 3; the view holds 10 items.
        assert_eq!(session.window_for(35), FetchWindow::new(3, 10, 30));
        assert_eq!(session.window_for(12), FetchWindow::new(1, 10, 10));
        assert_eq!(session.window_for(4), FetchWindow::new(0, 0, 10));

        let ticket = dispatched(session.on_progress(35));
        session.complete(&ticket, fetch(&collection, &ticket));
        assert_eq!(session.view().fetched_count(), 40);
    }

    #[test]
    fn same_window_is_coalesced() {
        let mut session = session(10);
        let first = dispatched(session.on_progress(0));

        assert_eq!(session.on_progress(5), Signal::Coalesced(first));
        assert_eq!(session.start(), Signal::Coalesced(first));
        assert_eq!(session.phase(), FetchPhase::Fetching(first));
    }

    #[test]
    fn superseded_fetch_is_discarded() {
        let collection = collection(40);
        let mut session = session(10);
        let first = dispatched(session.on_progress(0));

        let Signal::Dispatch { ticket: second, superseded } = session.on_progress(25) else {
            panic!("expected a dispatch");
        };
        assert_eq!(superseded, Some(first));
        assert_eq!(second.window(), FetchWindow::new(2, 0, 30));

        // The stale result arrives late and is ignored.
        let late = session.complete(&first, fetch(&collection, &first));
        assert!(matches!(late, Completion::Superseded));
        assert_eq!(session.view().fetched_count(), 0);
        assert_eq!(session.phase(), FetchPhase::Fetching(second));

        let completion = session.complete(&second, fetch(&collection, &second));
        assert!(matches!(completion, Completion::Merged(range) if range.count == 30));
    }

    #[test]
    fn refetch_does_not_duplicate() {
        let collection = collection(25);
        let mut session = session(10);
        let ticket = dispatched(session.start());
        session.complete(&ticket, fetch(&collection, &ticket));

        let again = dispatched(session.start());
        assert_eq!(again.window(), FetchWindow::new(0, 0, 10));
        let completion = session.complete(&again, fetch(&collection, &again));

        assert!(matches!(completion, Completion::Empty { total_size: 25 }));
        assert_eq!(session.view().fetched_count(), 10);
    }

    #[test]
    fn failure_retries_the_same_window() {
        let collection = collection(25);
        let mut session = session(10);
        let ticket = dispatched(session.start());
        session.complete(&ticket, fetch(&collection, &ticket));

        let failing = dispatched(session.on_progress(10));
        let completion = session.complete(&failing, Err(folio_core::Error::transient("disk gone")));
        assert!(matches!(completion, Completion::Failed { ref error } if error.is_retryable()));
        assert_eq!(session.view().fetched_count(), 10);
        assert_eq!(session.phase(), FetchPhase::Idle);

        let retry = dispatched(session.on_progress(10));
        assert_eq!(retry.window(), failing.window());
        assert_ne!(retry.generation(), failing.generation());
    }

    #[test]
    fn unlimited_page_is_truncated_when_strict() {
        let collection = collection(25);
        let mut session = session(10);
        let ticket = dispatched(session.start());

        let everything = PageResult::new(
            collection.as_slice().to_vec(),
            25,
            HonoredArgs::ALL.without(QueryArg::Limit),
        );
        let completion = session.complete(&ticket, Ok(everything));

        assert!(matches!(completion, Completion::Merged(range) if range.count == 10));
        assert_eq!(session.view().fetched_count(), 10);
    }

    #[test]
    fn unlimited_page_is_kept_when_lenient() {
        let collection = collection(25);
        let mut session = PagingSession::new(PagingConfig::new(10).lenient()).unwrap();
        let ticket = dispatched(session.start());

        let everything = PageResult::new(
            collection.as_slice().to_vec(),
            25,
            HonoredArgs::ALL.without(QueryArg::Limit),
        );
        session.complete(&ticket, Ok(everything));

        assert_eq!(session.view().fetched_count(), 25);
        assert!(session.view().is_complete());
    }

    #[test]
    fn ignored_offset_merges_from_the_head() {
        let collection = collection(25);
        let mut session = session(10);
        let ticket = dispatched(session.start());
        session.complete(&ticket, fetch(&collection, &ticket));

        // The provider answers the page at 10 with the head of the collection.
        let next = dispatched(session.on_progress(10));
        let head = PageResult::new(
            collection.as_slice()[..20].to_vec(),
            25,
            HonoredArgs::ALL.without(QueryArg::Offset),
        );
        let completion = session.complete(&next, Ok(head));

        assert!(matches!(completion, Completion::Merged(range) if range.start == 10 && range.count == 10));
        let ids: Vec<u64> = session.view().items().iter().map(|item| item.id.ordinal()).collect();
        assert_eq!(ids, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn snapshot_reports_fetching() {
        let mut session = session(10);
        assert!(!session.snapshot().fetching);
        dispatched(session.start());
        assert!(session.snapshot().fetching);
        assert!(session.cancel().is_some());
        assert!(!session.snapshot().fetching);
    }
}
