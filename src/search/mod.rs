//! Search orchestration module
//!
//! Drives providers in order with a per-attempt timeout, verifies their
//! results against the term and reports every failure when all of them
//! come up empty.

mod aggregator;
pub mod timeout;
pub mod verify;

pub use aggregator::SearchAggregator;
pub use verify::verify_results;
