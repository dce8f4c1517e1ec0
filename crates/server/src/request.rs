//! Inbound deck parameters and their normalized form.

use config::DeckMode;
use serde::Deserialize;
use sources::DiscoverFilters;

use crate::error::DeckError;

const CACHE_PREFIX: &str = "tmdb_deck_v2";
const MAX_RATING: f64 = 10.0;

/// Query string of `GET /api/tmdb/deck`, exactly as received
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckParams {
    pub min_votes: Option<u32>,
    pub min_rating: Option<f64>,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
    pub decades: Option<bool>,
    pub list_id: Option<String>,
}

/// A deck request with defaults applied and the mode decided
#[derive(Debug, Clone, PartialEq)]
pub enum DeckRequest {
    Discover(DiscoverFilters),
    List { list_id: String },
}

impl DeckRequest {
    /// Route `params` according to the configured mode.
    pub fn from_params(params: DeckParams, mode: DeckMode) -> Result<Self, DeckError> {
        match (mode, params.list_id) {
            (DeckMode::List, None) => Err(DeckError::client(
                "listId is required: this service only serves curated lists",
            )),
            (DeckMode::List | DeckMode::Auto, Some(list_id)) => Self::list(list_id),
            (DeckMode::Discover | DeckMode::Auto, _) => {
                if let (Some(min), Some(max)) = (params.min_year, params.max_year)
                    && min > max
                {
                    return Err(DeckError::client(format!(
                        "minYear ({min}) must not be after maxYear ({max})"
                    )));
                }
                if let Some(rating) = params.min_rating
                    && !(0.0..=MAX_RATING).contains(&rating)
                {
                    return Err(DeckError::client(format!(
                        "minRating must be between 0 and {MAX_RATING}, got {rating}"
                    )));
                }
                Ok(DeckRequest::Discover(DiscoverFilters::normalized(
                    params.min_votes,
                    params.min_rating,
                    params.min_year,
                    params.max_year,
                    params.decades.unwrap_or(false),
                )))
            }
        }
    }

    /// Mode B request. TMDb list ids are numeric; anything else is rejected.
    pub fn list(list_id: impl AsRef<str>) -> Result<Self, DeckError> {
        let list_id = list_id.as_ref().trim();
        if list_id.is_empty() {
            return Err(DeckError::client("listId must not be blank"));
        }
        if !list_id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DeckError::client(format!(
                "listId must be a numeric list id, got {list_id:?}"
            )));
        }
        Ok(DeckRequest::List {
            list_id: list_id.to_string(),
        })
    }

    pub fn cache_key(&self) -> String {
        match self {
            DeckRequest::Discover(filters) => format!(
                "{CACHE_PREFIX}:discover:{}:{}:{}:{}:{}",
                filters.min_votes,
                filters.min_rating,
                year_part(filters.min_year),
                year_part(filters.max_year),
                filters.decades
            ),
            DeckRequest::List { list_id } => format!("{CACHE_PREFIX}:list:{list_id}"),
        }
    }
}

fn year_part(year: Option<i32>) -> String {
    year.map_or_else(|| "-".to_string(), |y| y.to_string())
}
