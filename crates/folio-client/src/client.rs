//! Async driver running a [`PagingSession`] against a provider.

use std::sync::Arc;

use folio_core::{ListingProvider, PageResult, Target};
use tokio::sync::{mpsc, oneshot};
use tokio::task::AbortHandle;
use tokio_util::sync::CancellationToken;

use crate::event::{PagingEvent, PagingEvents};
use crate::generation::{FetchPhase, FetchTicket};
use crate::session::{Completion, PagingSession, Signal};
use crate::view::ViewSnapshot;
use crate::{Error, PagingConfig, Result, TRACING_TARGET};

enum Command {
    Start,
    Progress(usize),
    Snapshot(oneshot::Sender<ViewSnapshot>),
    Settled(oneshot::Sender<ViewSnapshot>),
}

type FetchOutcome = (FetchTicket, folio_core::Result<PageResult>);

/// Handle to a paging session running on a background task.
///
/// Signal methods enqueue a command and return immediately. The handle is
/// cheap to clone; the session stops once [`shutdown`](Self::shutdown) is
/// called or every handle is dropped.
#[derive(Debug, Clone)]
pub struct PagingClient {
    commands: mpsc::UnboundedSender<Command>,
    cancel_token: CancellationToken,
}

impl PagingClient {
    /// Spawns a session over `provider` and returns its handle and events.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` does not validate.
    pub fn spawn<P>(provider: P, config: PagingConfig) -> Result<(Self, PagingEvents)>
    where
        P: ListingProvider + 'static,
    {
        let session = PagingSession::new(config)?;
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let cancel_token = CancellationToken::new();

        let driver = Driver {
            provider: Arc::new(provider),
            session,
            commands: commands_rx,
            completions_tx,
            completions: completions_rx,
            events: events_tx,
            in_flight: None,
            settle_waiters: Vec::new(),
            cancel_token: cancel_token.clone(),
        };

        tracing::debug!(
            target: TRACING_TARGET,
            page_size = driver.session.config().page_size,
            strict_paging = driver.session.config().strict_paging,
            "Spawning paging session"
        );
        tokio::spawn(driver.run());

        let client = Self {
            commands: commands_tx,
            cancel_token,
        };
        Ok((client, PagingEvents::new(events_rx)))
    }

    /// Requests the first page.
    pub fn start(&self) -> Result<()> {
        self.send(Command::Start)
    }

    /// Reports that the consumer's read position reached `position`.
    pub fn report_progress(&self, position: usize) -> Result<()> {
        self.send(Command::Progress(position))
    }

    /// Returns a copy of the session's view.
    pub async fn snapshot(&self) -> Result<ViewSnapshot> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Snapshot(tx))?;
        rx.await.map_err(|_| Error::Closed)
    }

    /// Waits until no fetch is outstanding and returns the view at that point.
    ///
    /// Resolves immediately when the session is idle.
    pub async fn settled(&self) -> Result<ViewSnapshot> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Settled(tx))?;
        rx.await.map_err(|_| Error::Closed)
    }

    /// Stops the session and cancels the outstanding fetch.
    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }

    /// Returns true once the session no longer accepts signals.
    pub fn is_closed(&self) -> bool {
        self.cancel_token.is_cancelled() || self.commands.is_closed()
    }

    fn send(&self, command: Command) -> Result<()> {
        if self.cancel_token.is_cancelled() {
            return Err(Error::Closed);
        }
        self.commands.send(command).map_err(|_| Error::Closed)
    }
}

struct Driver<P> {
    provider: Arc<P>,
    session: PagingSession,
    commands: mpsc::UnboundedReceiver<Command>,
    completions_tx: mpsc::UnboundedSender<FetchOutcome>,
    completions: mpsc::UnboundedReceiver<FetchOutcome>,
    events: mpsc::UnboundedSender<PagingEvent>,
    in_flight: Option<AbortHandle>,
    settle_waiters: Vec<oneshot::Sender<ViewSnapshot>>,
    cancel_token: CancellationToken,
}

impl<P> Driver<P>
where
    P: ListingProvider + 'static,
{
    async fn run(mut self) {
        loop {
            tokio::select! {
                biased;

                () = self.cancel_token.cancelled() => {
                    tracing::debug!(target: TRACING_TARGET, "Shutdown requested, stopping session");
                    break;
                }

                Some((ticket, result)) = self.completions.recv() => {
                    self.on_completion(ticket, result);
                    self.notify_settled();
                }

                command = self.commands.recv() => match command {
                    Some(command) => self.on_command(command),
                    None => {
                        tracing::debug!(target: TRACING_TARGET, "All handles dropped, stopping session");
                        break;
                    }
                },
            }
        }

        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
        self.session.cancel();
    }

    fn on_command(&mut self, command: Command) {
        let signal = match command {
            Command::Start => self.session.start(),
            Command::Progress(position) => {
                tracing::trace!(target: TRACING_TARGET, position, "Progress reported");
                self.session.on_progress(position)
            }
            Command::Snapshot(reply) => {
                let _ = reply.send(self.session.snapshot());
                return;
            }
            Command::Settled(reply) => {
                self.settle_waiters.push(reply);
                self.notify_settled();
                return;
            }
        };

        match signal {
            Signal::Satisfied => {}
            Signal::Coalesced(ticket) => {
                tracing::trace!(
                    target: TRACING_TARGET,
                    generation = %ticket.generation(),
                    "Signal coalesced with in-flight fetch"
                );
            }
            Signal::Dispatch { ticket, superseded } => self.dispatch(ticket, superseded),
        }
    }

    fn notify_settled(&mut self) {
        if self.settle_waiters.is_empty() || self.session.phase() != FetchPhase::Idle {
            return;
        }
        let snapshot = self.session.snapshot();
        for waiter in self.settle_waiters.drain(..) {
            let _ = waiter.send(snapshot.clone());
        }
    }

    fn dispatch(&mut self, ticket: FetchTicket, superseded: Option<FetchTicket>) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
        if let Some(old) = superseded {
            tracing::debug!(
                target: TRACING_TARGET,
                superseded = %old.generation(),
                generation = %ticket.generation(),
                "Superseding in-flight fetch"
            );
        }

        let window = ticket.window();
        tracing::debug!(
            target: TRACING_TARGET,
            generation = %ticket.generation(),
            offset = window.offset,
            limit = window.limit,
            "Dispatching fetch"
        );

        let provider = Arc::clone(&self.provider);
        let completions = self.completions_tx.clone();
        let request = window.to_request();
        let task = tokio::spawn(async move {
            let result = provider.query(&Target::Collection, &request).await;
            let _ = completions.send((ticket, result));
        });
        self.in_flight = Some(task.abort_handle());
    }

    fn on_completion(&mut self, ticket: FetchTicket, result: folio_core::Result<PageResult>) {
        match self.session.complete(&ticket, result) {
            Completion::Superseded => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    generation = %ticket.generation(),
                    "Discarded result of superseded fetch"
                );
            }
            Completion::Failed { error } => {
                self.in_flight = None;
                tracing::warn!(
                    target: TRACING_TARGET,
                    generation = %ticket.generation(),
                    retryable = error.is_retryable(),
                    error = %error,
                    "Fetch failed"
                );
            }
            Completion::Merged(range) => {
                self.in_flight = None;
                tracing::info!(
                    target: TRACING_TARGET,
                    start = range.start,
                    count = range.count,
                    total_size = range.total_size,
                    "Fetched page"
                );
                // The consumer may have dropped its event stream.
                let _ = self.events.send(PagingEvent::Fetched(range));
            }
            Completion::Empty { total_size } => {
                self.in_flight = None;
                tracing::debug!(target: TRACING_TARGET, total_size, "Fetch returned nothing new");
            }
            Completion::Discontiguous { offset, fetched } => {
                self.in_flight = None;
                tracing::warn!(
                    target: TRACING_TARGET,
                    offset,
                    fetched,
                    "Discarded page that does not continue the view"
                );
            }
        }
    }
}
