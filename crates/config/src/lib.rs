//! Service configuration.
//!
//! A TOML file with `[service]`, `[tmdb]` and `[deck]` sections, every key
//! optional. The TMDb API key is the one required value and is layered:
//! 1. `tmdb.api_key` from the file
//! 2. the `Tmdb__ApiKey` environment variable
//! 3. the `Tmdb:ApiKey` environment variable
//!
//! The first non-blank source wins. No key at all is a startup error.

mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Deck, DeckMode, Service, Tmdb};

use std::{fs, path::Path};

use tracing::debug;

/// Environment variables consulted for the API key, in order
pub const API_KEY_ENV_VARS: [&str; 2] = ["Tmdb__ApiKey", "Tmdb:ApiKey"];

/// Load from `path` (or defaults when `None`) using the process environment.
pub fn load(path: Option<&Path>) -> Result<Config> {
    load_with_env(path, |name| std::env::var(name).ok())
}

/// Same as [`load`] with an explicit environment lookup.
pub fn load_with_env(path: Option<&Path>, env: impl Fn(&str) -> Option<String>) -> Result<Config> {
    let mut cfg = match path {
        Some(path) => read(path)?,
        None => Config::default(),
    };

    cfg.tmdb.api_key = resolve_api_key(&cfg.tmdb.api_key, env).ok_or(Error::MissingApiKey)?;

    validate(&cfg)?;

    Ok(cfg)
}

fn read(path: &Path) -> Result<Config> {
    let raw = fs::read_to_string(path).map_err(|err| Error::ReadConfig {
        path: path.to_path_buf(),
        source: err,
    })?;

    toml::from_str(&raw).map_err(|err| Error::ParseConfig {
        path: path.to_path_buf(),
        source: err,
    })
}

/// Pick the API key from the file value or the environment.
pub fn resolve_api_key(file_value: &str, env: impl Fn(&str) -> Option<String>) -> Option<String> {
    let file_value = file_value.trim();
    if !file_value.is_empty() {
        debug!("TMDb API key taken from config file");
        return Some(file_value.to_string());
    }

    API_KEY_ENV_VARS.iter().find_map(|name| {
        let value = env(name)?;
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        debug!("TMDb API key taken from {}", name);
        Some(value.to_string())
    })
}

pub fn validate(cfg: &Config) -> Result<()> {
    if cfg.tmdb.api_key.trim().is_empty() {
        return Err(Error::MissingApiKey);
    }
    if cfg.service.http_bind.trim().is_empty() {
        return Err(Error::Validation {
            message: "service.http_bind must be non-empty.".to_string(),
        });
    }
    if cfg.tmdb.base_url.trim().is_empty() {
        return Err(Error::Validation {
            message: "tmdb.base_url must be non-empty.".to_string(),
        });
    }
    if cfg.tmdb.timeout_ms == 0 {
        return Err(Error::Validation {
            message: "tmdb.timeout_ms must be greater than zero.".to_string(),
        });
    }
    if cfg.deck.enrichment_concurrency == 0 {
        return Err(Error::Validation {
            message: "deck.enrichment_concurrency must be greater than zero.".to_string(),
        });
    }
    if cfg.deck.discover_ttl_secs == 0 || cfg.deck.list_ttl_secs == 0 {
        return Err(Error::Validation {
            message: "deck TTLs must be greater than zero.".to_string(),
        });
    }

    Ok(())
}
