//! Page results and the arguments a provider honored.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

use super::{Item, PageRequest};

/// A query argument a provider may or may not apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum QueryArg {
    /// The starting index.
    Offset,
    /// The maximum item count.
    Limit,
}

/// The subset of query arguments a provider actually applied.
///
/// A consumer must not assume limit enforcement unless [`QueryArg::Limit`]
/// is present here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HonoredArgs {
    /// Whether the offset was applied.
    #[serde(default)]
    pub offset: bool,
    /// Whether the limit was applied.
    #[serde(default)]
    pub limit: bool,
}

impl HonoredArgs {
    /// No argument honored.
    pub const NONE: Self = Self {
        offset: false,
        limit: false,
    };

    /// Both arguments honored.
    pub const ALL: Self = Self {
        offset: true,
        limit: true,
    };

    /// Returns the arguments supplied by `request`, i.e. what a provider that
    /// applies every argument it receives reports back.
    pub fn supplied_by(request: &PageRequest) -> Self {
        Self {
            offset: request.offset.is_some(),
            limit: request.limit.is_some(),
        }
    }

    /// Returns whether `arg` was honored.
    #[inline]
    pub fn contains(&self, arg: QueryArg) -> bool {
        match arg {
            QueryArg::Offset => self.offset,
            QueryArg::Limit => self.limit,
        }
    }

    /// Returns a copy with `arg` marked as not honored.
    #[inline]
    pub fn without(mut self, arg: QueryArg) -> Self {
        match arg {
            QueryArg::Offset => self.offset = false,
            QueryArg::Limit => self.limit = false,
        }
        self
    }

    /// Iterates over the honored arguments in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = QueryArg> + '_ {
        [QueryArg::Offset, QueryArg::Limit]
            .into_iter()
            .filter(|arg| self.contains(*arg))
    }
}

/// Result of an offset/limit query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult {
    /// Items of this page, in collection order.
    pub items: Vec<Item>,
    /// Length of the full collection at the time of the query.
    pub total_size: u64,
    /// Which of the requested arguments were applied.
    pub honored: HonoredArgs,
}

impl PageResult {
    /// Creates a new page result.
    pub fn new(items: Vec<Item>, total_size: u64, honored: HonoredArgs) -> Self {
        Self {
            items,
            total_size,
            honored,
        }
    }

    /// Creates an empty page of a collection with `total_size` items.
    pub fn empty(total_size: u64, honored: HonoredArgs) -> Self {
        Self::new(Vec::new(), total_size, honored)
    }

    /// Returns the number of items in this page.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if this page has no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns whether more items exist after this page.
    ///
    /// Only meaningful when the offset was honored.
    pub fn has_more(&self, offset: u64) -> bool {
        offset.saturating_add(self.items.len() as u64) < self.total_size
    }
}
