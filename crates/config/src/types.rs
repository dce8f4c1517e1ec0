use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub service: Service,
    pub tmdb: Tmdb,
    pub deck: Deck,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Service {
    pub http_bind: String,
    /// Default filter directive; `RUST_LOG` wins when set
    pub log_level: String,
}

impl Default for Service {
    fn default() -> Self {
        Self {
            http_bind: "127.0.0.1:8080".to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tmdb {
    /// Filled from the environment during `load` when the file leaves it empty.
    pub api_key: String,
    pub base_url: String,
    /// Prefix for poster paths, size segment included.
    pub image_base: String,
    pub language: String,
    pub timeout_ms: u64,
}

impl Tmdb {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for Tmdb {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.themoviedb.org/3".to_string(),
            image_base: "https://image.tmdb.org/t/p/w342".to_string(),
            language: "en-US".to_string(),
            timeout_ms: 10_000,
        }
    }
}

/// Which sampling modes the deck endpoint serves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeckMode {
    /// A `listId` parameter selects the curated list, otherwise discovery
    #[default]
    Auto,
    Discover,
    List,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Deck {
    pub mode: DeckMode,
    pub enrichment_concurrency: usize,
    pub discover_ttl_secs: u64,
    pub list_ttl_secs: u64,
}

impl Deck {
    pub fn discover_ttl(&self) -> Duration {
        Duration::from_secs(self.discover_ttl_secs)
    }

    pub fn list_ttl(&self) -> Duration {
        Duration::from_secs(self.list_ttl_secs)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self {
            mode: DeckMode::Auto,
            enrichment_concurrency: 8,
            discover_ttl_secs: 5 * 60,
            list_ttl_secs: 10 * 60,
        }
    }
}
