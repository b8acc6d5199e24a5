#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod mock;

pub use mock::{
    FlakyProvider, GateController, GatedProvider, PendingQuery, SwappableProvider, UnboundedProvider,
    sample_items, sample_provider,
};
