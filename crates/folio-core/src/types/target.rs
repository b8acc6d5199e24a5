//! Call targets and their content types.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, IntoStaticStr};

use super::ItemId;

/// What a provider call addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Target {
    /// The whole ordered collection; the only target paged queries accept.
    Collection,
    /// A single item resolved by identity.
    Item(ItemId),
}

impl Target {
    /// Returns true if this target is the whole collection.
    #[inline]
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::Collection)
    }
}

/// Content type descriptor of a [`Target`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(AsRefStr, Display, IntoStaticStr)]
pub enum ContentType {
    /// A directory of items.
    #[strum(serialize = "vnd.folio.dir/item")]
    Directory,
    /// A single item.
    #[strum(serialize = "vnd.folio.item/item")]
    Item,
}

impl ContentType {
    /// Returns the content type of `target`.
    pub const fn of(target: &Target) -> Self {
        if target.is_collection() {
            Self::Directory
        } else {
            Self::Item
        }
    }

    /// Returns the MIME-like string of this content type.
    pub fn as_mime(&self) -> &'static str {
        self.into()
    }
}
