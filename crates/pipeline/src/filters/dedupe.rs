//! Filter that removes duplicate cards.
//!
//! Two cards with the same id are the same card, whatever their other
//! fields say (one may be enriched and the other not).

use crate::traits::Filter;
use cards::{CardRecord, MovieId};
use std::collections::HashSet;

/// Keeps the first occurrence of every id, preserving input order.
///
/// ## Algorithm
/// Walk the cards once, remembering seen ids in a HashSet; a card whose id
/// was already seen is dropped. Order preservation matters for curated
/// lists, where the curator's order must survive to the output.
pub struct DedupeByIdFilter;

impl Filter for DedupeByIdFilter {
    fn name(&self) -> &str {
        "DedupeByIdFilter"
    }

    fn apply(&self, cards: Vec<CardRecord>) -> Vec<CardRecord> {
        let mut seen: HashSet<MovieId> = HashSet::with_capacity(cards.len());
        cards
            .into_iter()
            .filter(|card| seen.insert(card.id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cards::{DEFAULT_IMAGE_BASE, RawCandidate};

    fn card(id: MovieId, title: &str) -> CardRecord {
        CardRecord::from_candidate(&RawCandidate::new(id, title), DEFAULT_IMAGE_BASE)
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence() {
        let cards = vec![
            card(1, "First"),
            card(2, "Two"),
            card(1, "Second"),
            card(3, "Three"),
            card(2, "Again"),
        ];

        let kept = DedupeByIdFilter.apply(cards);

        let ids: Vec<_> = kept.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(kept[0].title, "First");
        assert_eq!(kept[1].title, "Two");
    }

    #[test]
    fn test_dedupe_without_duplicates_is_identity() {
        let cards = vec![card(3, "C"), card(1, "A"), card(2, "B")];
        let kept = DedupeByIdFilter.apply(cards.clone());
        assert_eq!(kept, cards);
    }

    #[test]
    fn test_dedupe_empty() {
        assert!(DedupeByIdFilter.apply(Vec::new()).is_empty());
    }
}
