//! HTTP client for the TMDb movie metadata API.
//!
//! This crate provides a thin client over the three endpoints deck assembly
//! needs:
//! - `GET /discover/movie`: filtered, paginated search
//! - `GET /list/{id}`: a curated, ordered list
//! - `GET /movie/{id}?append_to_response=credits`: full detail with crew
//!
//! Every request carries the API key and the language tag. There is no retry
//! logic here; a failure is reported to the caller, which decides whether it
//! is fatal (a page fetch) or tolerable (a single detail fetch).

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use cards::{MovieDetail, MovieId, RawCandidate};

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Errors that can occur when talking to TMDb
#[derive(Error, Debug)]
pub enum TmdbError {
    /// TMDb answered with a non-success status. The raw body is kept so it
    /// can be surfaced to our own caller verbatim.
    #[error("TMDb returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to reach TMDb: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response from TMDb: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid TMDb base URL: {0}")]
    BaseUrl(String),

    /// An identifier that cannot stand as a single path segment
    #[error("Invalid path segment: {0:?}")]
    PathSegment(String),
}

impl TmdbError {
    /// Upstream status code, if TMDb answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            TmdbError::Status { status, .. } => Some(*status),
            TmdbError::Transport(err) => err.status().map(|s| s.as_u16()),
            TmdbError::Decode(_) | TmdbError::BaseUrl(_) | TmdbError::PathSegment(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, TmdbError>;

// =============================================================================
// Response Shapes
// =============================================================================

/// One page of discover results
#[derive(Debug, Clone, Deserialize)]
pub struct PagedResults {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub results: Vec<RawCandidate>,
}

/// A curated list. `items` is absent for some lists, which is not an error.
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub items: Option<Vec<RawCandidate>>,
}

// =============================================================================
// Queries
// =============================================================================

/// Filters for a discover query
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoverQuery {
    pub min_votes: u32,
    pub min_rating: f64,
    /// Inclusive, mapped to `primary_release_date.gte = {year}-01-01`
    pub from_year: Option<i32>,
    /// Inclusive, mapped to `primary_release_date.lte = {year}-12-31`
    pub to_year: Option<i32>,
}

impl DiscoverQuery {
    pub fn new(min_votes: u32, min_rating: f64) -> Self {
        Self {
            min_votes,
            min_rating,
            from_year: None,
            to_year: None,
        }
    }

    /// Restrict the query to an inclusive range of release years
    pub fn with_years(mut self, from_year: Option<i32>, to_year: Option<i32>) -> Self {
        self.from_year = from_year;
        self.to_year = to_year;
        self
    }

    fn to_params(&self, page: u32) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("include_adult", "false".to_string()),
            ("vote_count.gte", self.min_votes.to_string()),
            ("vote_average.gte", self.min_rating.to_string()),
            ("sort_by", "vote_count.desc".to_string()),
        ];
        if let Some(year) = self.from_year {
            params.push(("primary_release_date.gte", format!("{year}-01-01")));
        }
        if let Some(year) = self.to_year {
            params.push(("primary_release_date.lte", format!("{year}-12-31")));
        }
        params.push(("page", page.to_string()));
        params
    }
}

// =============================================================================
// Client
// =============================================================================

/// Connection settings for [`TmdbClient`]
#[derive(Debug, Clone)]
pub struct TmdbSettings {
    pub api_key: String,
    pub base_url: String,
    pub language: String,
    pub timeout: Duration,
}

impl TmdbSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Point the client at another host (used for the in-process mock)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Client for the TMDb API.
///
/// Cheap to clone: the underlying `reqwest::Client` shares its connection pool.
#[derive(Clone)]
pub struct TmdbClient {
    http: Client,
    base_url: Url,
    api_key: String,
    language: String,
}

impl TmdbClient {
    pub fn new(settings: TmdbSettings) -> Result<Self> {
        let http = Client::builder().timeout(settings.timeout).build()?;
        let base_url = Url::parse(settings.base_url.trim_end_matches('/'))
            .map_err(|err| TmdbError::BaseUrl(format!("{}: {err}", settings.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(TmdbError::BaseUrl(settings.base_url));
        }
        Ok(Self {
            http,
            base_url,
            api_key: settings.api_key,
            language: settings.language,
        })
    }

    /// Fetch one page of discover results
    pub async fn discover(&self, query: &DiscoverQuery, page: u32) -> Result<PagedResults> {
        self.get_json(&["discover", "movie"], &query.to_params(page))
            .await
    }

    /// Fetch a curated list by identifier.
    ///
    /// The id is always one path segment (`/` is percent-encoded, dot
    /// segments are refused), so the request cannot leave the list endpoint.
    pub async fn list(&self, list_id: &str) -> Result<ListResponse> {
        self.get_json(&["list", list_id], &[]).await
    }

    /// Fetch full movie detail including credits
    pub async fn movie_details(&self, id: MovieId) -> Result<MovieDetail> {
        self.get_json(
            &["movie", &id.to_string()],
            &[("append_to_response", "credits".to_string())],
        )
        .await
    }

    /// Perform one GET and parse the JSON body.
    ///
    /// The body is read as text first so a non-success response can carry it.
    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        params: &[(&'static str, String)],
    ) -> Result<T> {
        let url = self.endpoint(segments)?;
        let path = url.path().to_string();
        debug!("GET {}", path);

        let response = self
            .http
            .get(url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", self.language.as_str()),
            ])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("TMDb {} failed with status {}", path, status.as_u16());
            return Err(TmdbError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Base URL joined with `segments`, each percent-encoded on its own
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        if let Some(bad) = segments
            .iter()
            .find(|segment| segment.is_empty() || segment.chars().all(|c| c == '.'))
        {
            return Err(TmdbError::PathSegment(bad.to_string()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TmdbError::BaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}
