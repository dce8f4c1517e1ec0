use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tokio::sync::Semaphore;
use tracing::debug;

use cards::CardRecord;
use config::{Config, DeckMode};
use server::{DeckAssembler, DeckParams, DeckRequest};
use sources::{CURATED_DECKS, DeckRng};

/// Decade Deck - movie card decks from TMDb
#[derive(Parser)]
#[command(name = "decade-deck")]
#[command(about = "Builds movie card decks from TMDb discovery or curated lists", long_about = None)]
struct Cli {
    /// TOML config file; defaults and environment apply when omitted
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a discovery deck
    Deck {
        #[arg(long)]
        min_votes: Option<u32>,

        #[arg(long)]
        min_rating: Option<f64>,

        #[arg(long)]
        min_year: Option<i32>,

        #[arg(long)]
        max_year: Option<i32>,

        /// Sample every decade since 1950 instead of one pooled page
        #[arg(long)]
        decades: bool,
    },

    /// Build a deck from a curated list
    List {
        /// Catalog key (e.g. horrorDeck) or raw TMDb list id
        list: String,
    },

    /// Show the curated deck catalog
    Lists,

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "20")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "5")]
        concurrent: usize,

        /// Number of distinct filter sets cycled through (1 = mostly cache hits)
        #[arg(long, default_value = "1")]
        distinct: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The catalog is static; no key needed to show it
    if let Commands::Lists = cli.command {
        server::init_tracing("warn");
        print_catalog();
        return Ok(());
    }

    let config = config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    server::init_tracing(&config.service.log_level);
    let assembler = DeckAssembler::from_config(&config, DeckRng::from_entropy())?;

    match cli.command {
        Commands::Deck {
            min_votes,
            min_rating,
            min_year,
            max_year,
            decades,
        } => {
            let params = DeckParams {
                min_votes,
                min_rating,
                min_year,
                max_year,
                decades: Some(decades),
                list_id: None,
            };
            let request = DeckRequest::from_params(params, DeckMode::Discover)?;
            handle_deck(&assembler, &request).await?
        }
        Commands::List { list } => {
            let list_id = sources::catalog::find(&list).map_or(list.as_str(), |deck| deck.list_id);
            let request = DeckRequest::list(list_id)?;
            handle_deck(&assembler, &request).await?
        }
        Commands::Benchmark {
            requests,
            concurrent,
            distinct,
        } => handle_benchmark(&config, assembler, requests, concurrent, distinct).await?,
        Commands::Lists => {}
    }

    Ok(())
}

/// Handle the 'deck' and 'list' commands
async fn handle_deck(assembler: &DeckAssembler, request: &DeckRequest) -> Result<()> {
    let start = Instant::now();
    let deck = assembler.assemble(request).await?;
    print_deck(&deck);
    println!(
        "{} {} cards in {:.2?}",
        "✓".green(),
        deck.len(),
        start.elapsed()
    );
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    config: &Config,
    assembler: DeckAssembler,
    requests: usize,
    concurrent: usize,
    distinct: u32,
) -> Result<()> {
    if requests == 0 {
        return Err(anyhow!("--requests must be greater than zero"));
    }
    debug!(base_url = %config.tmdb.base_url, "Benchmarking against");

    let semaphore = Arc::new(Semaphore::new(concurrent.max(1)));
    let distinct = distinct.max(1);
    let start = Instant::now();

    let mut handles = Vec::with_capacity(requests);
    for i in 0..requests {
        let assembler = assembler.clone();
        let semaphore = Arc::clone(&semaphore);
        // Vary the vote floor so each filter set gets its own cache entry
        let params = DeckParams {
            min_votes: Some(300 + (i as u32 % distinct)),
            ..DeckParams::default()
        };
        let request = DeckRequest::from_params(params, DeckMode::Discover)?;

        handles.push(tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await?;
            let started = Instant::now();
            assembler.assemble(&request).await?;
            Ok::<_, anyhow::Error>(started.elapsed())
        }));
    }

    let mut timings = Vec::with_capacity(requests);
    let mut failures = 0usize;
    for handle in handles {
        match handle.await? {
            Ok(elapsed) => timings.push(elapsed),
            Err(err) => {
                failures += 1;
                println!("{} {:#}", "✗".red(), err);
            }
        }
    }
    let wall = start.elapsed();

    if timings.is_empty() {
        return Err(anyhow!("All {} requests failed", requests));
    }
    timings.sort();
    let total: Duration = timings.iter().sum();
    let avg_latency = total / timings.len() as u32;
    let percentile = |p: f64| timings[((timings.len() as f64 * p) as usize).min(timings.len() - 1)];

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} ({} failed)", requests, failures);
    println!("Wall time: {:.2?}", wall);
    println!("Average latency: {:.2?}", avg_latency);
    println!("P50 latency: {:.2?}", percentile(0.50));
    println!("P95 latency: {:.2?}", percentile(0.95));
    println!("P99 latency: {:.2?}", percentile(0.99));
    println!(
        "Throughput: {:.2} requests/second",
        timings.len() as f64 / wall.as_secs_f64()
    );
    println!("Cached decks: {}", assembler.cache().len());

    Ok(())
}

fn print_catalog() {
    println!("{}", "Curated decks:".bold().blue());
    for deck in CURATED_DECKS {
        println!(
            "{} {} ({})",
            "•".green(),
            deck.label.bold(),
            format!("{} / list {}", deck.key, deck.list_id).dimmed()
        );
    }
}

/// Helper function to format and print a deck
fn print_deck(deck: &[CardRecord]) {
    println!("{}", "Deck:".bold().blue());
    for (i, card) in deck.iter().enumerate() {
        let year = card
            .year
            .map_or_else(|| "????".to_string(), |y| y.to_string());
        let rating = card
            .rating
            .map_or_else(|| "-".to_string(), |r| format!("{r:.1}"));
        println!(
            "{}. {} ({}) - {} [{}]",
            (i + 1).to_string().green(),
            card.title.bold(),
            year,
            card.director.as_deref().unwrap_or("unknown director").cyan(),
            rating
        );
    }
}
