//! # Deck Assembler
//!
//! This module coordinates the entire deck pipeline:
//! 1. Look the normalized request up in the request cache
//! 2. Sample raw candidates (discovery or curated list)
//! 3. Enrich every candidate with its detail record
//! 4. Deduplicate and, for discovery decks, sample down to the deck size
//! 5. Store the deck under the request's key with the mode's TTL
//!
//! A failure while sampling aborts the request and nothing is cached.
//! Enrichment failures never abort; they only cost a card its director.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use tracing::{debug, info, instrument};

use cards::CardRecord;
use pipeline::{EnrichmentPool, FilterPipeline};
use sources::{CuratedListSource, DeckRng, DiscoverySource};
use tmdb_client::{TmdbClient, TmdbSettings};

use crate::cache::RequestCache;
use crate::error::DeckError;
use crate::request::DeckRequest;

/// Cards in a discovery deck
pub const DECK_SIZE: usize = 20;

pub const DEFAULT_DISCOVER_TTL: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_LIST_TTL: Duration = Duration::from_secs(10 * 60);

/// Main assembler that turns deck requests into decks
#[derive(Clone)]
pub struct DeckAssembler {
    discovery: DiscoverySource,
    curated: CuratedListSource,
    enrichment: EnrichmentPool,
    rng: DeckRng,
    discover_pipeline: Arc<FilterPipeline>,
    list_pipeline: Arc<FilterPipeline>,
    cache: Arc<RequestCache>,
    discover_ttl: Duration,
    list_ttl: Duration,
}

impl DeckAssembler {
    pub fn new(client: TmdbClient, rng: DeckRng) -> Self {
        Self {
            discovery: DiscoverySource::new(client.clone(), rng.clone()),
            curated: CuratedListSource::new(client.clone()),
            enrichment: EnrichmentPool::new(client),
            discover_pipeline: Arc::new(FilterPipeline::for_discovery(rng.clone(), DECK_SIZE)),
            list_pipeline: Arc::new(FilterPipeline::for_curated_list()),
            rng,
            cache: Arc::new(RequestCache::new()),
            discover_ttl: DEFAULT_DISCOVER_TTL,
            list_ttl: DEFAULT_LIST_TTL,
        }
    }

    /// Build the client and every stage from the service configuration
    pub fn from_config(cfg: &config::Config, rng: DeckRng) -> anyhow::Result<Self> {
        let settings = TmdbSettings::new(cfg.tmdb.api_key.clone())
            .with_base_url(cfg.tmdb.base_url.clone())
            .with_language(cfg.tmdb.language.clone())
            .with_timeout(cfg.tmdb.timeout());
        let client = TmdbClient::new(settings).context("Failed to build TMDb client")?;

        Ok(Self::new(client, rng)
            .with_enrichment_concurrency(cfg.deck.enrichment_concurrency)
            .with_image_base(&cfg.tmdb.image_base)
            .with_ttls(cfg.deck.discover_ttl(), cfg.deck.list_ttl()))
    }

    /// Configure how many detail fetches run at once (default: 8)
    pub fn with_enrichment_concurrency(mut self, concurrency: usize) -> Self {
        self.enrichment = self.enrichment.with_concurrency(concurrency);
        self
    }

    pub fn with_image_base(mut self, image_base: &str) -> Self {
        self.enrichment = self.enrichment.with_image_base(image_base);
        self
    }

    /// Configure cache lifetimes for discovery and curated decks
    pub fn with_ttls(mut self, discover: Duration, list: Duration) -> Self {
        self.discover_ttl = discover;
        self.list_ttl = list;
        self
    }

    /// Configure the discovery deck size (default: 20)
    pub fn with_deck_size(mut self, deck_size: usize) -> Self {
        self.discover_pipeline = Arc::new(FilterPipeline::for_discovery(self.rng.clone(), deck_size));
        self
    }

    pub fn cache(&self) -> &RequestCache {
        &self.cache
    }

    /// Main entry point: get the deck for a request
    #[instrument(skip(self, request), fields(key = %request.cache_key()))]
    pub async fn assemble(&self, request: &DeckRequest) -> Result<Vec<CardRecord>, DeckError> {
        let key = request.cache_key();
        if let Some(deck) = self.cache.get(&key) {
            debug!("Cache hit ({} cards)", deck.len());
            return Ok(deck);
        }

        let start_time = Instant::now();

        let (candidates, pipeline, ttl) = match request {
            DeckRequest::Discover(filters) => (
                self.discovery.sample(filters).await?,
                &self.discover_pipeline,
                self.discover_ttl,
            ),
            DeckRequest::List { list_id } => (
                self.curated.sample(list_id).await?,
                &self.list_pipeline,
                self.list_ttl,
            ),
        };
        info!("Sampled {} candidates", candidates.len());

        let cards = self.enrichment.enrich(candidates).await;
        let deck = pipeline.apply(cards);

        self.cache.set(key, deck.clone(), ttl);

        info!(
            "Assembled deck of {} cards in {:.2?}",
            deck.len(),
            start_time.elapsed()
        );
        Ok(deck)
    }
}
