//! Convenient re-exports for common use.

pub use crate::error::{BoxedError, Error, ErrorKind, Result};
pub use crate::provider::ListingProvider;
pub use crate::types::{
    Collection, ContentType, HonoredArgs, Item, ItemId, PageRequest, PageResult, QueryArg, Target,
};
