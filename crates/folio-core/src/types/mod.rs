//! Data model shared by providers and clients.

mod collection;
mod item;
mod request;
mod result;
mod target;

pub use collection::Collection;
pub use item::{Item, ItemId};
pub use request::{PageBounds, PageRequest};
pub use result::{HonoredArgs, PageResult, QueryArg};
pub use target::{ContentType, Target};
