//! Append-only client view of fetched items.

use folio_core::Item;
use serde::{Deserialize, Serialize};

/// Outcome of merging a page into a [`ViewState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// `count` new items were appended starting at index `start`.
    ///
    /// `count` is zero when the page only covered items already held.
    Appended {
        /// Index of the first appended item.
        start: usize,
        /// Number of appended items.
        count: usize,
    },
    /// The page starts past the end of the view and was not merged.
    Gap {
        /// Offset the page starts at.
        offset: usize,
        /// Number of items the view holds.
        fetched: usize,
    },
}

/// A row of the presentation: either a fetched item or a placeholder for an
/// item the provider reported but the client has not fetched yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot<'a> {
    /// The item at this position has been fetched.
    Fetched(&'a Item),
    /// The position lies within the known total but is not fetched yet.
    Placeholder,
}

/// Client-held, contiguous prefix of the provider's collection.
///
/// Items are only ever appended, and only at the index they occupy in the
/// collection, so the view never holds gaps or duplicates as long as the
/// provider keeps its order stable.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    items: Vec<Item>,
    total_size: Option<u64>,
}

impl ViewState {
    /// Creates an empty view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Offset the next contiguous fetch starts at.
    #[inline]
    pub fn next_offset(&self) -> usize {
        self.items.len()
    }

    /// Number of items fetched so far.
    #[inline]
    pub fn fetched_count(&self) -> usize {
        self.items.len()
    }

    /// Last total size reported by the provider, if any fetch completed.
    #[inline]
    pub fn total_size(&self) -> Option<u64> {
        self.total_size
    }

    /// Number of rows the presentation shows, fetched or not.
    pub fn item_count(&self) -> usize {
        let total = self
            .total_size
            .map_or(0, |total| usize::try_from(total).unwrap_or(usize::MAX));
        total.max(self.items.len())
    }

    /// Returns true once every reported item has been fetched.
    pub fn is_complete(&self) -> bool {
        self.total_size
            .is_some_and(|total| self.items.len() as u64 >= total)
    }

    /// Returns the fetched items.
    #[inline]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Returns the row at `position`, or `None` past the known total.
    pub fn slot(&self, position: usize) -> Option<Slot<'_>> {
        match self.items.get(position) {
            Some(item) => Some(Slot::Fetched(item)),
            None if position < self.item_count() => Some(Slot::Placeholder),
            None => None,
        }
    }

    /// Merges a page whose first item sits at collection index `offset`.
    ///
    /// Items whose index is already held are skipped; the rest is appended.
    /// The total size is updated from every page, including empty ones and
    /// rejected ones.
    pub fn merge(&mut self, offset: usize, items: Vec<Item>, total_size: u64) -> MergeOutcome {
        self.total_size = Some(total_size);

        let fetched = self.items.len();
        if offset > fetched {
            return MergeOutcome::Gap { offset, fetched };
        }

        let overlap = fetched - offset;
        let start = fetched;
        self.items.extend(items.into_iter().skip(overlap));

        MergeOutcome::Appended {
            start,
            count: self.items.len() - start,
        }
    }
}

/// Point-in-time copy of a session's view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSnapshot {
    /// Fetched items, in collection order.
    pub items: Vec<Item>,
    /// Last total size reported by the provider.
    pub total_size: Option<u64>,
    /// Whether a fetch was outstanding when the snapshot was taken.
    pub fetching: bool,
}

impl ViewSnapshot {
    /// Number of items fetched.
    #[inline]
    pub fn fetched_count(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use folio_core::ItemId;

    use super::*;

    fn items(range: std::ops::Range<u64>) -> Vec<Item> {
        range
            .map(|i| Item::new(ItemId::new(i), format!("{i}.jpeg"), format!("/{i}.jpeg"), 0))
            .collect()
    }

    fn ids(view: &ViewState) -> Vec<u64> {
        view.items().iter().map(|item| item.id.ordinal()).collect()
    }

    #[test]
    fn contiguous_pages_are_appended() {
        let mut view = ViewState::new();
        assert_eq!(
            view.merge(0, items(0..10), 25),
            MergeOutcome::Appended { start: 0, count: 10 }
        );
        assert_eq!(
            view.merge(10, items(10..20), 25),
            MergeOutcome::Appended { start: 10, count: 10 }
        );
        assert_eq!(
            view.merge(20, items(20..25), 25),
            MergeOutcome::Appended { start: 20, count: 5 }
        );

        assert_eq!(view.fetched_count(), 25);
        assert_eq!(view.next_offset(), 25);
        assert!(view.is_complete());
        assert_eq!(ids(&view), (0..25).collect::<Vec<_>>());
    }

    #[test]
    fn refetched_page_is_not_duplicated() {
        let mut view = ViewState::new();
        view.merge(0, items(0..10), 25);

        assert_eq!(
            view.merge(0, items(0..10), 25),
            MergeOutcome::Appended { start: 10, count: 0 }
        );
        assert_eq!(ids(&view), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn overlapping_page_appends_only_the_tail() {
        let mut view = ViewState::new();
        view.merge(0, items(0..15), 30);

        assert_eq!(
            view.merge(10, items(10..20), 30),
            MergeOutcome::Appended { start: 15, count: 5 }
        );
        assert_eq!(ids(&view), (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn gap_is_rejected_but_total_is_updated() {
        let mut view = ViewState::new();
        view.merge(0, items(0..10), 25);

        assert_eq!(
            view.merge(20, items(20..25), 40),
            MergeOutcome::Gap { offset: 20, fetched: 10 }
        );
        assert_eq!(view.fetched_count(), 10);
        assert_eq!(view.total_size(), Some(40));
    }

    #[test]
    fn empty_page_updates_total() {
        let mut view = ViewState::new();
        assert_eq!(
            view.merge(0, Vec::new(), 0),
            MergeOutcome::Appended { start: 0, count: 0 }
        );
        assert_eq!(view.total_size(), Some(0));
        assert!(view.is_complete());
    }

    #[test]
    fn slots_show_placeholders_up_to_total() {
        let mut view = ViewState::new();
        assert_eq!(view.slot(0), None);

        view.merge(0, items(0..10), 25);
        assert_eq!(view.item_count(), 25);
        assert!(matches!(view.slot(9), Some(Slot::Fetched(item)) if item.id.ordinal() == 9));
        assert_eq!(view.slot(10), Some(Slot::Placeholder));
        assert_eq!(view.slot(24), Some(Slot::Placeholder));
        assert_eq!(view.slot(25), None);
    }
}
