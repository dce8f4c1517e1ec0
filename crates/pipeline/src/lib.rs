//! Enrichment and selection of deck candidates.
//!
//! This crate provides:
//! - EnrichmentPool: bounded-concurrency detail fetches turning raw
//!   candidates into cards
//! - Filter trait and implementations for card selection
//! - FilterPipeline for composing filters
//!
//! ## Architecture
//! The pipeline processes candidates in stages:
//! 1. The EnrichmentPool fetches details (director, canonical rating,
//!    overview, poster, date) for every candidate, at most 8 at a time
//! 2. Filters deduplicate cards by id and, for discovery decks, sample
//!    a random subset
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{EnrichmentPool, FilterPipeline};
//!
//! let pool = EnrichmentPool::new(client.clone());
//! let cards = pool.enrich(candidates).await;
//!
//! let deck = FilterPipeline::for_discovery(rng.clone(), 20).apply(cards);
//! ```

pub mod enrichment;
pub mod filter_pipeline;
pub mod filters;
pub mod traits;

// Re-export main types
pub use enrichment::{EnrichmentPool, merge_detail};
pub use filter_pipeline::FilterPipeline;
pub use traits::Filter;
