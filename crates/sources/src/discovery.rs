//! Discovery Source - Filtered Discovery (Mode A)
//!
//! Samples candidates from TMDb's discover endpoint.
//!
//! ## Algorithm
//! Pooled (default):
//! 1. Fetch page 1 of the filtered query to learn `total_pages`
//! 2. Clamp to at most 50 pages and pick one uniformly at random
//! 3. Fetch that page; every item on it is a candidate
//!
//! Stratified (`decades = true`):
//! 1. Build the decade buckets for the current year
//! 2. For each decade, in order: query restricted to the decade, clamp to at
//!    most 5 pages, fetch a random page, shuffle it and keep up to 3 items
//! 3. A decade that fails is logged and contributes nothing
//!
//! A failure in pooled mode aborts the whole request: there is nothing to
//! fall back to.

use cards::{DecadeBucket, RawCandidate};
use tmdb_client::{DiscoverQuery, Result, TmdbClient};
use tracing::{debug, info, instrument, warn};

use crate::decades::current_decade_buckets;
use crate::rng::DeckRng;
use crate::usable;

pub const DEFAULT_MIN_VOTES: u32 = 300;
pub const DEFAULT_MIN_RATING: f64 = 6.0;

/// Normalized Mode A request: defaults already applied
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoverFilters {
    pub min_votes: u32,
    pub min_rating: f64,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
    /// Sample every decade independently instead of one pooled page
    pub decades: bool,
}

impl DiscoverFilters {
    /// Applies the defaults (300 votes, 6.0 rating) to missing values
    pub fn normalized(
        min_votes: Option<u32>,
        min_rating: Option<f64>,
        min_year: Option<i32>,
        max_year: Option<i32>,
        decades: bool,
    ) -> Self {
        Self {
            min_votes: min_votes.unwrap_or(DEFAULT_MIN_VOTES),
            min_rating: min_rating.unwrap_or(DEFAULT_MIN_RATING),
            min_year,
            max_year,
            decades,
        }
    }

    pub fn stratified(mut self) -> Self {
        self.decades = true;
        self
    }

    fn query(&self) -> DiscoverQuery {
        DiscoverQuery::new(self.min_votes, self.min_rating)
    }
}

impl Default for DiscoverFilters {
    fn default() -> Self {
        Self::normalized(None, None, None, None, false)
    }
}

/// Mode A candidate source
#[derive(Clone)]
pub struct DiscoverySource {
    client: TmdbClient,
    rng: DeckRng,

    /// Upper bound on the random page in pooled mode
    max_pages: u32,

    /// Upper bound on the random page for each decade
    decade_max_pages: u32,

    /// Items kept from each decade's page
    per_decade: usize,
}

impl DiscoverySource {
    pub fn new(client: TmdbClient, rng: DeckRng) -> Self {
        Self {
            client,
            rng,
            max_pages: 50,
            decade_max_pages: 5,
            per_decade: 3,
        }
    }

    /// Configure the pooled page clamp (default: 50)
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Configure the per-decade page clamp (default: 5)
    pub fn with_decade_max_pages(mut self, max_pages: u32) -> Self {
        self.decade_max_pages = max_pages;
        self
    }

    /// Configure how many movies each decade contributes (default: 3)
    pub fn with_per_decade(mut self, per_decade: usize) -> Self {
        self.per_decade = per_decade;
        self
    }

    /// Produce raw candidates for a Mode A request
    #[instrument(skip(self), fields(decades = filters.decades))]
    pub async fn sample(&self, filters: &DiscoverFilters) -> Result<Vec<RawCandidate>> {
        if filters.decades {
            Ok(self.sample_stratified(filters).await)
        } else {
            self.sample_pooled(filters).await
        }
    }

    async fn sample_pooled(&self, filters: &DiscoverFilters) -> Result<Vec<RawCandidate>> {
        let query = filters.query().with_years(filters.min_year, filters.max_year);

        let first = self.client.discover(&query, 1).await?;
        let max_page = first.total_pages.min(self.max_pages);
        let page = self.rng.page_in(max_page);
        debug!(
            "Discover reports {} pages, picked page {} of {}",
            first.total_pages, page, max_page
        );

        let chosen = self.client.discover(&query, page).await?;
        let candidates = usable(chosen.results);
        info!("Sampled {} candidates from page {}", candidates.len(), page);
        Ok(candidates)
    }

    async fn sample_stratified(&self, filters: &DiscoverFilters) -> Vec<RawCandidate> {
        let buckets = current_decade_buckets();
        let mut pool = Vec::new();

        // One decade at a time; a failed decade only costs its own cards
        for bucket in &buckets {
            match self.sample_decade(filters, bucket).await {
                Ok(found) => {
                    debug!(
                        "Decade {}-{} contributed {} candidates",
                        bucket.from_year,
                        bucket.to_year,
                        found.len()
                    );
                    pool.extend(found);
                }
                Err(err) => {
                    warn!(
                        error = %err,
                        "Decade fetch failed for {}-{}",
                        bucket.from_year,
                        bucket.to_year
                    );
                }
            }
        }

        info!(
            "Sampled {} candidates across {} decades",
            pool.len(),
            buckets.len()
        );
        pool
    }

    async fn sample_decade(
        &self,
        filters: &DiscoverFilters,
        bucket: &DecadeBucket,
    ) -> Result<Vec<RawCandidate>> {
        let query = filters
            .query()
            .with_years(Some(bucket.from_year), Some(bucket.to_year));

        let first = self.client.discover(&query, 1).await?;
        let page = self
            .rng
            .page_in(first.total_pages.min(self.decade_max_pages));

        let chosen = self.client.discover(&query, page).await?;
        let mut items = usable(chosen.results);
        self.rng.shuffle(&mut items);
        items.truncate(self.per_decade);
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_apply_defaults() {
        let filters = DiscoverFilters::normalized(None, None, Some(1980), None, false);

        assert_eq!(filters.min_votes, 300);
        assert_eq!(filters.min_rating, 6.0);
        assert_eq!(filters.min_year, Some(1980));
        assert_eq!(filters.max_year, None);
        assert!(!filters.decades);
    }

    #[test]
    fn test_explicit_values_win_over_defaults() {
        let filters = DiscoverFilters::normalized(Some(50), Some(7.5), None, None, true);

        assert_eq!(filters.min_votes, 50);
        assert_eq!(filters.min_rating, 7.5);
        assert!(filters.decades);
    }

    #[test]
    fn test_default_matches_empty_request() {
        assert_eq!(
            DiscoverFilters::default(),
            DiscoverFilters::normalized(Some(300), Some(6.0), None, None, false)
        );
    }
}
