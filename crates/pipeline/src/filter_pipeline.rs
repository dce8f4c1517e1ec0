//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! selection filters together using the builder pattern, plus the two
//! pipelines deck assembly actually uses.

use crate::filters::{DedupeByIdFilter, RandomSampleFilter};
use crate::traits::Filter;
use cards::CardRecord;
use sources::DeckRng;
use tracing;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(DedupeByIdFilter)
///     .add_filter(RandomSampleFilter::new(rng.clone(), 20));
///
/// let deck = pipeline.apply(cards);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Selection for discovery decks: dedupe by id, then a random `deck_size` subset
    pub fn for_discovery(rng: DeckRng, deck_size: usize) -> Self {
        Self::new()
            .add_filter(DedupeByIdFilter)
            .add_filter(RandomSampleFilter::new(rng, deck_size))
    }

    /// Selection for curated lists: dedupe by id, order untouched
    pub fn for_curated_list() -> Self {
        Self::new().add_filter(DedupeByIdFilter)
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Apply all filters in sequence to the cards.
    pub fn apply(&self, cards: Vec<CardRecord>) -> Vec<CardRecord> {
        let mut current = cards;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current);
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cards::{DEFAULT_IMAGE_BASE, MovieId, RawCandidate};
    use std::collections::HashSet;

    fn card(id: MovieId) -> CardRecord {
        CardRecord::from_candidate(
            &RawCandidate::new(id, format!("Movie {id}")),
            DEFAULT_IMAGE_BASE,
        )
    }

    #[test]
    fn test_empty_pipeline() {
        let pipeline = FilterPipeline::new();
        let cards = vec![card(1), card(1)];

        let kept = pipeline.apply(cards.clone());
        assert_eq!(kept, cards);
    }

    #[test]
    fn test_discovery_pipeline_dedupes_and_bounds_size() {
        // 40 distinct ids, every one duplicated
        let cards: Vec<_> = (1..=40).chain(1..=40).map(card).collect();

        let deck = FilterPipeline::for_discovery(DeckRng::seeded(3), 20).apply(cards);

        assert_eq!(deck.len(), 20);
        let ids: HashSet<_> = deck.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), deck.len(), "no duplicate ids in a deck");
    }

    #[test]
    fn test_discovery_pipeline_small_pool() {
        let cards = vec![card(1), card(2), card(2), card(3)];

        let deck = FilterPipeline::for_discovery(DeckRng::seeded(3), 20).apply(cards);

        assert_eq!(deck.len(), 3, "bounded by distinct ids available");
    }

    #[test]
    fn test_curated_pipeline_preserves_order() {
        let cards = vec![card(9), card(4), card(9), card(7)];

        let deck = FilterPipeline::for_curated_list().apply(cards);

        let ids: Vec<_> = deck.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![9, 4, 7]);
    }
}
