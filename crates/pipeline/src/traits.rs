//! Core traits for the selection pipeline.
//!
//! This module defines the Filter trait that allows composable
//! selection stages to be applied to enriched cards.

use cards::CardRecord;

/// Core trait for selecting cards.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be shared across request tasks
/// - Filters take ownership of the Vec<CardRecord> and return the kept cards
/// - Filters never fail: by the time cards reach selection, every upstream
///   call has already succeeded or degraded
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of cards.
    fn apply(&self, cards: Vec<CardRecord>) -> Vec<CardRecord>;
}
