//! Aggregation modules.
//!
//! Pure statistics derived from the submission record list.

pub mod aggregator;

pub use aggregator::*;
