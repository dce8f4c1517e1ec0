//! Process-wide randomness for page picks and shuffles.
//!
//! A single `DeckRng` is created at startup and cloned into every component
//! that samples. Tests construct it with a fixed seed so shuffles and page
//! choices are reproducible.

use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Shared random source. The lock is never held across an `.await`.
#[derive(Clone)]
pub struct DeckRng {
    inner: Arc<Mutex<StdRng>>,
}

impl DeckRng {
    /// Seeded from the operating system
    pub fn from_entropy() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// Deterministic source for tests and benchmarks
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            inner: Arc::new(Mutex::new(rng)),
        }
    }

    /// Uniform page in `[1, max_page]`; page 1 when there is nothing to pick from
    pub fn page_in(&self, max_page: u32) -> u32 {
        if max_page <= 1 {
            return 1;
        }
        let mut rng = self.inner.lock().unwrap_or_else(|err| err.into_inner());
        rng.random_range(1..=max_page)
    }

    /// Uniform in-place permutation
    pub fn shuffle<T>(&self, items: &mut [T]) {
        let mut rng = self.inner.lock().unwrap_or_else(|err| err.into_inner());
        items.shuffle(&mut *rng);
    }
}

impl Default for DeckRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_in_stays_in_range() {
        let rng = DeckRng::seeded(7);
        for _ in 0..500 {
            let page = rng.page_in(50);
            assert!((1..=50).contains(&page));
        }
    }

    #[test]
    fn test_page_in_degenerate_ranges() {
        let rng = DeckRng::seeded(7);
        assert_eq!(rng.page_in(0), 1);
        assert_eq!(rng.page_in(1), 1);
    }

    #[test]
    fn test_seeded_shuffles_are_reproducible() {
        let mut a: Vec<u32> = (0..20).collect();
        let mut b = a.clone();

        DeckRng::seeded(42).shuffle(&mut a);
        DeckRng::seeded(42).shuffle(&mut b);

        assert_eq!(a, b);
        let mut sorted = a.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }
}
