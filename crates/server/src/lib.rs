//! Server crate for the deck assembly service.
//!
//! This crate contains the deck assembler that coordinates sampling,
//! enrichment, selection and caching, and the axum surface in front of it.

pub mod cache;
pub mod error;
pub mod orchestrator;
pub mod request;
pub mod routes;
pub mod state;

pub use cache::RequestCache;
pub use error::DeckError;
pub use orchestrator::{DECK_SIZE, DeckAssembler};
pub use request::{DeckParams, DeckRequest};
pub use state::AppState;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "deck-server", version, about = "Serves movie card decks built from TMDb")]
pub struct Args {
    /// TOML config file; defaults apply when omitted
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,
}

pub async fn run(args: Args) -> anyhow::Result<()> {
    let config = config::load(args.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(&config.service.log_level);

    let http_addr: SocketAddr = config
        .service
        .http_bind
        .parse()
        .with_context(|| format!("Invalid service.http_bind: {}", config.service.http_bind))?;
    let state = AppState::from_config(&config)?;
    spawn_cache_purge(Arc::clone(&state.assembler), Duration::from_secs(60));
    let app = routes::router(state);

    let listener = TcpListener::bind(http_addr)
        .await
        .with_context(|| format!("Failed to bind {http_addr}"))?;
    tracing::info!(%http_addr, mode = ?config.deck.mode, "HTTP server listening.");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Periodically drop expired decks that no request has read since expiry
fn spawn_cache_purge(assembler: Arc<DeckAssembler>, every: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            let purged = assembler.cache().purge_expired();
            if purged > 0 {
                tracing::debug!(purged, remaining = assembler.cache().len(), "Purged expired decks");
            }
        }
    });
}

/// `RUST_LOG` wins over the configured level.
pub fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
