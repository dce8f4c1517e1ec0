//! Example: Sample raw candidates from TMDb
//!
//! Run with: Tmdb__ApiKey=... cargo run --package sources --example sample_candidates
//!
//! This example shows how to:
//! 1. Build a TMDb client
//! 2. Sample a pooled Mode A page
//! 3. Sample a stratified Mode A pool
//! 4. Fetch a curated list (Mode B)

use anyhow::Context;
use sources::{CURATED_DECKS, CuratedListSource, DeckRng, DiscoverFilters, DiscoverySource};
use std::time::Instant;
use tmdb_client::{TmdbClient, TmdbSettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt().with_env_filter("info").init();

    println!("=== Decade Deck Sampling Example ===\n");

    let api_key = std::env::var("Tmdb__ApiKey").context("Set Tmdb__ApiKey to run this example")?;
    let client = TmdbClient::new(TmdbSettings::new(api_key))?;
    let rng = DeckRng::from_entropy();

    let discovery = DiscoverySource::new(client.clone(), rng);

    let start = Instant::now();
    let pooled = discovery.sample(&DiscoverFilters::default()).await?;
    println!("Pooled: {} candidates in {:?}", pooled.len(), start.elapsed());
    for candidate in pooled.iter().take(5) {
        println!(
            "  {:>8}  {} ({})",
            candidate.id,
            candidate.usable_title().unwrap_or("?"),
            candidate.release_date.as_deref().unwrap_or("????")
        );
    }

    let start = Instant::now();
    let stratified = discovery
        .sample(&DiscoverFilters::default().stratified())
        .await?;
    println!(
        "\nStratified: {} candidates in {:?}",
        stratified.len(),
        start.elapsed()
    );

    let deck = &CURATED_DECKS[0];
    let curated = CuratedListSource::new(client);
    let start = Instant::now();
    let listed = curated.sample(deck.list_id).await?;
    println!(
        "\n{}: {} candidates in {:?}",
        deck.label,
        listed.len(),
        start.elapsed()
    );

    Ok(())
}
