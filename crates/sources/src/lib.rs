//! # Sources Crate
//!
//! This crate decides which raw candidates a deck is built from.
//!
//! ## Components
//!
//! ### Discovery Source (Mode A)
//! Filtered discovery over TMDb's discover endpoint:
//! - Pooled: one random page (out of at most 50) of the filtered query
//! - Stratified: up to 3 random movies from a random page of every decade
//!   since 1950, so the deck spans the whole timeline
//!
//! ### Curated List Source (Mode B)
//! Every movie of a curated TMDb list, in list order, with no sampling.
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{CuratedListSource, DeckRng, DiscoverFilters, DiscoverySource};
//!
//! let rng = DeckRng::from_entropy();
//! let discovery = DiscoverySource::new(client.clone(), rng.clone());
//! let candidates = discovery.sample(&DiscoverFilters::default().stratified()).await?;
//!
//! let curated = CuratedListSource::new(client);
//! let candidates = curated.sample("8605209").await?;
//! ```

// Public modules
pub mod catalog;
pub mod curated;
pub mod decades;
pub mod discovery;
pub mod rng;

// Re-export commonly used types
pub use catalog::{CURATED_DECKS, CuratedDeck};
pub use curated::CuratedListSource;
pub use decades::{build_decade_buckets, current_decade_buckets};
pub use discovery::{DiscoverFilters, DiscoverySource};
pub use rng::DeckRng;

use cards::RawCandidate;
use tracing::debug;

/// Drops items that have nothing to put on a card (no title)
pub(crate) fn usable(items: Vec<RawCandidate>) -> Vec<RawCandidate> {
    let total = items.len();
    let kept: Vec<RawCandidate> = items
        .into_iter()
        .filter(|item| item.usable_title().is_some())
        .collect();
    if kept.len() < total {
        debug!("Skipped {} untitled items", total - kept.len());
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usable_drops_untitled_items() {
        let mut untitled = RawCandidate::new(2, "");
        untitled.title = None;
        let items = vec![
            RawCandidate::new(1, "Jaws"),
            untitled,
            RawCandidate::new(3, "   "),
            RawCandidate::new(4, "Rocky"),
        ];

        let kept = usable(items);

        let ids: Vec<_> = kept.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 4]);
    }
}
