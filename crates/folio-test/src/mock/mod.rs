//! Mock listing providers for testing.
//!
//! Each mock wraps another [`ListingProvider`](folio_core::ListingProvider)
//! and changes how queries reach it.

mod flaky;
mod gated;
mod swappable;
mod unbounded;

pub use flaky::FlakyProvider;
use folio_core::{Item, ItemId};
use folio_provider::MemoryProvider;
pub use gated::{GateController, GatedProvider, PendingQuery};
pub use swappable::SwappableProvider;
pub use unbounded::UnboundedProvider;

/// Creates `len` items named `item-000.jpeg`, `item-001.jpeg`, and so on.
pub fn sample_items(len: usize) -> Vec<Item> {
    (0..len as u64)
        .map(|i| {
            Item::new(
                ItemId::new(i),
                format!("item-{i:03}.jpeg"),
                format!("/samples/item-{i:03}.jpeg"),
                1024 + i,
            )
        })
        .collect()
}

/// Creates an in-memory provider over [`sample_items`].
pub fn sample_provider(len: usize) -> MemoryProvider {
    MemoryProvider::from_items(sample_items(len))
}
