//! Simulated consumer scrolling down a paged list.

use anyhow::{Context, bail};
use folio_client::{FetchedRange, PagingClient, PagingConfig, PagingEvent, PagingEvents, ViewSnapshot};
use folio_core::ListingProvider;

use crate::TRACING_TARGET_SCROLL;

/// Ranges fetched while scrolling and the final view.
#[derive(Debug)]
pub struct ScrollReport {
    pub ranges: Vec<FetchedRange>,
    pub snapshot: ViewSnapshot,
}

/// Shows the list, then advances the read position by `scroll_step` rows
/// until it reaches the last row of the collection.
pub async fn scroll_through<P>(
    provider: P,
    paging: PagingConfig,
    scroll_step: usize,
) -> anyhow::Result<ScrollReport>
where
    P: ListingProvider + 'static,
{
    let (client, mut events) =
        PagingClient::spawn(provider, paging).context("failed to start paging session")?;
    let mut ranges = Vec::new();

    client.start()?;
    let mut snapshot = client.settled().await?;
    drain(&mut events, &mut ranges);

    let Some(total_size) = snapshot.total_size else {
        client.shutdown();
        bail!("initial page could not be fetched");
    };
    let total = usize::try_from(total_size).unwrap_or(usize::MAX);

    let last_row = total.saturating_sub(1);
    let mut position = 0;
    while position < last_row {
        position = position.saturating_add(scroll_step).min(last_row);

        tracing::trace!(target: TRACING_TARGET_SCROLL, position, "Scrolled");
        client.report_progress(position)?;
        snapshot = client.settled().await?;
        drain(&mut events, &mut ranges);
    }

    client.shutdown();
    Ok(ScrollReport { ranges, snapshot })
}

fn drain(events: &mut PagingEvents, ranges: &mut Vec<FetchedRange>) {
    while let Some(PagingEvent::Fetched(range)) = events.try_recv() {
        tracing::info!(
            target: TRACING_TARGET_SCROLL,
            start = range.start,
            count = range.count,
            total_size = range.total_size,
            "{}",
            range.status_message()
        );
        ranges.push(range);
    }
}
