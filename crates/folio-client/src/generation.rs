//! Generation tokens for serializing fetches within a session.

use derive_more::Display;
use folio_core::PageRequest;

/// Monotonically increasing marker of a dispatched fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("#{_0}")]
pub struct Generation(u64);

impl Generation {
    /// Returns the raw counter value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// The `(offset, limit)` window a session requests for one fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchWindow {
    /// Logical page slot the window was computed for.
    pub page: usize,
    /// Collection index of the first requested item.
    pub offset: usize,
    /// Number of requested items.
    pub limit: usize,
}

impl FetchWindow {
    /// Creates a window.
    #[inline]
    pub const fn new(page: usize, offset: usize, limit: usize) -> Self {
        Self {
            page,
            offset,
            limit,
        }
    }

    /// Collection index one past the last requested item.
    #[inline]
    pub const fn end(&self) -> usize {
        self.offset.saturating_add(self.limit)
    }

    /// Returns the provider request for this window.
    pub fn to_request(&self) -> PageRequest {
        PageRequest::new(
            i64::try_from(self.offset).unwrap_or(i64::MAX),
            i64::try_from(self.limit).unwrap_or(i64::MAX),
        )
    }
}

/// Handle of one dispatched fetch.
///
/// A completion is only merged if it carries the ticket of the fetch that is
/// currently outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    generation: Generation,
    window: FetchWindow,
}

impl FetchTicket {
    /// Generation of the fetch.
    #[inline]
    pub const fn generation(&self) -> Generation {
        self.generation
    }

    /// Window the fetch requested.
    #[inline]
    pub const fn window(&self) -> FetchWindow {
        self.window
    }
}

/// Fetch phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPhase {
    /// No outstanding fetch.
    #[default]
    Idle,
    /// A fetch is outstanding.
    Fetching(FetchTicket),
}

/// Tracks the single outstanding fetch of a session.
#[derive(Debug, Clone, Default)]
pub struct FetchTracker {
    issued: u64,
    phase: FetchPhase,
}

impl FetchTracker {
    /// Creates an idle tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current phase.
    #[inline]
    pub fn phase(&self) -> FetchPhase {
        self.phase
    }

    /// Returns the outstanding ticket, if any.
    pub fn in_flight(&self) -> Option<FetchTicket> {
        match self.phase {
            FetchPhase::Idle => None,
            FetchPhase::Fetching(ticket) => Some(ticket),
        }
    }

    /// Starts a fetch for `window`, superseding any outstanding one.
    ///
    /// Returns the new ticket and the ticket it replaced.
    pub fn begin(&mut self, window: FetchWindow) -> (FetchTicket, Option<FetchTicket>) {
        self.issued += 1;
        let ticket = FetchTicket {
            generation: Generation(self.issued),
            window,
        };
        let superseded = self.in_flight();
        self.phase = FetchPhase::Fetching(ticket);
        (ticket, superseded)
    }

    /// Finishes the fetch identified by `ticket`.
    ///
    /// Returns false and leaves the phase untouched if `ticket` is stale.
    pub fn finish(&mut self, ticket: &FetchTicket) -> bool {
        match self.phase {
            FetchPhase::Fetching(current) if current.generation == ticket.generation => {
                self.phase = FetchPhase::Idle;
                true
            }
            _ => false,
        }
    }

    /// Drops the outstanding fetch without completing it.
    pub fn cancel(&mut self) -> Option<FetchTicket> {
        let ticket = self.in_flight();
        self.phase = FetchPhase::Idle;
        ticket
    }
}
