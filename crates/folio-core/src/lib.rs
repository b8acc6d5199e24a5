#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;
mod provider;

pub mod prelude;
pub mod types;

pub use error::{BoxedError, Error, ErrorKind, Result};
pub use provider::{ListingProvider, require_collection};
pub use types::{
    Collection, ContentType, HonoredArgs, Item, ItemId, PageBounds, PageRequest, PageResult,
    QueryArg, Target,
};
