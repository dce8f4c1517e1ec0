//! Enrichment of raw candidates with full movie detail.
//!
//! Every candidate gets one detail fetch (with credits). At most
//! `concurrency` fetches are in flight at once; the rest wait for a permit.
//!
//! ## Failure policy
//! A failed fetch (transport error, non-success status, bad JSON, even a
//! panicked task) never fails the deck. The card is built from the cheaper
//! candidate fields with no director instead.

use std::sync::Arc;

use cards::{CardRecord, DEFAULT_IMAGE_BASE, MovieDetail, RawCandidate, parse_year, poster_url};
use tmdb_client::TmdbClient;
use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};

/// Default number of detail fetches in flight per request
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Bounded-concurrency fan-out of detail fetches
#[derive(Clone)]
pub struct EnrichmentPool {
    client: TmdbClient,
    image_base: Arc<str>,
    concurrency: usize,
}

impl EnrichmentPool {
    pub fn new(client: TmdbClient) -> Self {
        Self {
            client,
            image_base: Arc::from(DEFAULT_IMAGE_BASE),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Configure the number of concurrent detail fetches (default: 8)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Configure the image base prefixed to poster paths
    pub fn with_image_base(mut self, image_base: impl AsRef<str>) -> Self {
        self.image_base = Arc::from(image_base.as_ref());
        self
    }

    /// Turn candidates into cards, one card per candidate, in input order.
    #[instrument(skip(self, candidates), fields(count = candidates.len()))]
    pub async fn enrich(&self, candidates: Vec<RawCandidate>) -> Vec<CardRecord> {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));

        // Spawn everything up front; the semaphore does the queueing
        let mut handles = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let semaphore = Arc::clone(&semaphore);
            let client = self.client.clone();
            let image_base = Arc::clone(&self.image_base);
            let fallback = candidate.clone();

            let handle = tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok();
                enrich_one(&client, &candidate, &image_base).await
            });
            handles.push((fallback, handle));
        }

        let mut cards = Vec::with_capacity(handles.len());
        let mut degraded = 0usize;
        for (fallback, handle) in handles {
            match handle.await {
                Ok(Enriched::Full(card)) => cards.push(card),
                Ok(Enriched::Fallback(card)) => {
                    degraded += 1;
                    cards.push(card);
                }
                Err(err) => {
                    warn!(movie_id = fallback.id, error = %err, "Enrichment task failed");
                    degraded += 1;
                    cards.push(CardRecord::from_candidate(&fallback, &self.image_base));
                }
            }
        }

        info!(
            "Enriched {} cards ({} from candidate fields only)",
            cards.len(),
            degraded
        );
        cards
    }
}

enum Enriched {
    Full(CardRecord),
    Fallback(CardRecord),
}

async fn enrich_one(client: &TmdbClient, candidate: &RawCandidate, image_base: &str) -> Enriched {
    match client.movie_details(candidate.id).await {
        Ok(detail) => Enriched::Full(merge_detail(candidate, &detail, image_base)),
        Err(err) => {
            debug!(
                movie_id = candidate.id,
                error = %err,
                "Detail fetch failed, using candidate fields"
            );
            Enriched::Fallback(CardRecord::from_candidate(candidate, image_base))
        }
    }
}

/// Combine a candidate with its detail record.
///
/// Detail fields win; each missing detail field falls back to the
/// candidate's value. The title always comes from the candidate.
pub fn merge_detail(candidate: &RawCandidate, detail: &MovieDetail, image_base: &str) -> CardRecord {
    let year = detail
        .release_date
        .as_deref()
        .and_then(parse_year)
        .or_else(|| candidate.release_date.as_deref().and_then(parse_year));

    let poster = detail
        .poster_path
        .as_deref()
        .and_then(|path| poster_url(image_base, path))
        .or_else(|| {
            candidate
                .poster_path
                .as_deref()
                .and_then(|path| poster_url(image_base, path))
        });

    CardRecord {
        id: candidate.id,
        title: candidate.usable_title().unwrap_or_default().to_string(),
        year,
        director: detail.director().map(str::to_string),
        rating: detail.rating.or(candidate.rating),
        poster,
        description: detail
            .overview
            .clone()
            .or_else(|| candidate.overview.clone())
            .unwrap_or_default(),
    }
}
