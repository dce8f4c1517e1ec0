//! Filter that draws a uniformly random subset of cards.

use crate::traits::Filter;
use cards::CardRecord;
use sources::DeckRng;

/// Shuffles the cards and keeps the first `size`.
///
/// Used for discovery decks only; curated lists keep their order.
pub struct RandomSampleFilter {
    rng: DeckRng,
    size: usize,
}

impl RandomSampleFilter {
    /// Create a new RandomSampleFilter.
    ///
    /// # Arguments
    /// * `rng` - Shared randomness source
    /// * `size` - Maximum number of cards to keep (typically 20)
    pub fn new(rng: DeckRng, size: usize) -> Self {
        Self { rng, size }
    }
}

impl Filter for RandomSampleFilter {
    fn name(&self) -> &str {
        "RandomSampleFilter"
    }

    fn apply(&self, mut cards: Vec<CardRecord>) -> Vec<CardRecord> {
        self.rng.shuffle(&mut cards);
        cards.truncate(self.size);
        cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cards::{DEFAULT_IMAGE_BASE, RawCandidate};
    use std::collections::HashSet;

    fn cards(count: u64) -> Vec<CardRecord> {
        (1..=count)
            .map(|id| {
                CardRecord::from_candidate(
                    &RawCandidate::new(id, format!("Movie {id}")),
                    DEFAULT_IMAGE_BASE,
                )
            })
            .collect()
    }

    #[test]
    fn test_sample_truncates_to_size() {
        let filter = RandomSampleFilter::new(DeckRng::seeded(1), 20);
        let kept = filter.apply(cards(45));

        assert_eq!(kept.len(), 20);
        let ids: HashSet<_> = kept.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), 20);
        assert!(ids.iter().all(|id| (1..=45).contains(id)));
    }

    #[test]
    fn test_sample_smaller_pool_keeps_everything() {
        let filter = RandomSampleFilter::new(DeckRng::seeded(1), 20);
        let kept = filter.apply(cards(7));

        let mut ids: Vec<_> = kept.iter().map(|c| c.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=7).collect::<Vec<_>>());
    }

    #[test]
    fn test_sample_is_reproducible_with_seed() {
        let a = RandomSampleFilter::new(DeckRng::seeded(11), 5).apply(cards(30));
        let b = RandomSampleFilter::new(DeckRng::seeded(11), 5).apply(cards(30));
        assert_eq!(a, b);
    }
}
