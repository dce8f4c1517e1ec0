//! Filter implementations for the selection pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod dedupe;
pub mod random_sample;

// Re-export for convenience
pub use dedupe::DedupeByIdFilter;
pub use random_sample::RandomSampleFilter;
