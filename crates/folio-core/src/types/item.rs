//! Listing items and their stable identity.

use std::path::{Path, PathBuf};

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

/// Stable identity of an item within one provider session.
///
/// Identities are assigned in enumeration order, so the item at collection
/// index `n` has id `n` for as long as the collection lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Display, From, Into, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    /// Creates an identity from its ordinal.
    #[inline]
    pub const fn new(ordinal: u64) -> Self {
        Self(ordinal)
    }

    /// Returns the ordinal backing this identity.
    #[inline]
    pub const fn ordinal(self) -> u64 {
        self.0
    }
}

/// A single enumerated record.
///
/// Items are immutable once enumerated. The core never interprets the
/// fields; they are carried through to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Stable identity.
    pub id: ItemId,
    /// Human-readable name shown next to the row.
    pub display_name: String,
    /// Absolute location of the backing resource.
    pub location: PathBuf,
    /// Size of the backing resource in bytes.
    pub size: u64,
}

impl Item {
    /// Creates a new item.
    pub fn new(
        id: ItemId,
        display_name: impl Into<String>,
        location: impl Into<PathBuf>,
        size: u64,
    ) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            location: location.into(),
            size,
        }
    }

    /// Returns the absolute location of the backing resource.
    pub fn location(&self) -> &Path {
        &self.location
    }
}
