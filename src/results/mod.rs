//! Result types shared by providers and the aggregator

mod types;

pub use types::*;
