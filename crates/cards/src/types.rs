//! Core domain types for deck assembly.
//!
//! Wire types (`RawCandidate`, `MovieDetail`) keep the upstream's snake_case
//! field names; `CardRecord` is what we serve and uses camelCase.

use serde::{Deserialize, Serialize};

// =============================================================================
// Type Aliases
// =============================================================================

/// Upstream-assigned movie identity, stable across calls
pub type MovieId = u64;

/// Image base prefixed to relative poster paths
pub const DEFAULT_IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w342";

// =============================================================================
// Upstream Shapes
// =============================================================================

/// A movie as returned by a discover page or a curated list.
///
/// Every field except `id` is optional on the wire, so they are parsed once
/// here instead of probed later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCandidate {
    pub id: MovieId,
    /// TV entries in curated lists carry `name` instead of `title`
    #[serde(default, alias = "name")]
    pub title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default, rename = "vote_average")]
    pub rating: Option<f64>,
}

impl RawCandidate {
    /// Minimal candidate, mostly useful for tests and fixtures
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: Some(title.into()),
            overview: None,
            poster_path: None,
            release_date: None,
            rating: None,
        }
    }

    /// Returns the trimmed title, or `None` when the item has nothing to show
    pub fn usable_title(&self) -> Option<&str> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
    }
}

/// One member of a movie's crew
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewMember {
    #[serde(default)]
    pub job: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Credits sub-resource embedded with `append_to_response=credits`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

/// Full movie detail record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub id: MovieId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default, rename = "vote_average")]
    pub rating: Option<f64>,
    #[serde(default)]
    pub credits: Option<Credits>,
}

impl MovieDetail {
    /// Name of the first crew member whose job is exactly "Director"
    pub fn director(&self) -> Option<&str> {
        self.credits
            .as_ref()?
            .crew
            .iter()
            .find(|member| member.job.as_deref() == Some("Director"))
            .and_then(|member| member.name.as_deref())
    }
}

// =============================================================================
// CardRecord
// =============================================================================

/// The card handed to the game board.
///
/// `id` is the identity: two records with the same id are the same card.
/// Optional fields serialize as explicit `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub id: MovieId,
    pub title: String,
    pub year: Option<i32>,
    pub director: Option<String>,
    /// Average vote, 0 to 10
    pub rating: Option<f64>,
    /// Absolute poster URL
    pub poster: Option<String>,
    pub description: String,
}

impl CardRecord {
    /// Builds a card from the cheap candidate fields only.
    ///
    /// This is both the sampling-time shape and the fallback used when the
    /// detail fetch fails, so `director` is always `None`.
    pub fn from_candidate(candidate: &RawCandidate, image_base: &str) -> Self {
        Self {
            id: candidate.id,
            title: candidate.usable_title().unwrap_or_default().to_string(),
            year: candidate.release_date.as_deref().and_then(parse_year),
            director: None,
            rating: candidate.rating,
            poster: candidate
                .poster_path
                .as_deref()
                .and_then(|path| poster_url(image_base, path)),
            description: candidate.overview.clone().unwrap_or_default(),
        }
    }
}

// =============================================================================
// DecadeBucket
// =============================================================================

/// Inclusive ten year window, e.g. 1980..=1989
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecadeBucket {
    pub from_year: i32,
    pub to_year: i32,
}

impl DecadeBucket {
    /// Bucket starting at `from_year` and spanning ten years
    pub fn starting_at(from_year: i32) -> Self {
        Self {
            from_year,
            to_year: from_year + 9,
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.from_year..=self.to_year).contains(&year)
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Extracts the year from an ISO release date ("1999-03-31" -> 1999).
///
/// Blank or malformed dates yield `None`.
pub fn parse_year(release_date: &str) -> Option<i32> {
    let trimmed = release_date.trim();
    let digits = trimmed.get(..4)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Prefixes the image base to a relative poster path, `None` if blank
pub fn poster_url(image_base: &str, poster_path: &str) -> Option<String> {
    let path = poster_path.trim();
    if path.is_empty() {
        return None;
    }
    Some(format!("{image_base}{path}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("1999-03-31"), Some(1999));
        assert_eq!(parse_year("2024"), Some(2024));
        assert_eq!(parse_year(""), None);
        assert_eq!(parse_year("   "), None);
        assert_eq!(parse_year("soon"), None);
        assert_eq!(parse_year("19"), None);
    }

    #[test]
    fn test_poster_url() {
        assert_eq!(
            poster_url(DEFAULT_IMAGE_BASE, "/abc.jpg").as_deref(),
            Some("https://image.tmdb.org/t/p/w342/abc.jpg")
        );
        assert_eq!(poster_url(DEFAULT_IMAGE_BASE, ""), None);
        assert_eq!(poster_url(DEFAULT_IMAGE_BASE, "  "), None);
    }

    #[test]
    fn test_card_from_candidate() {
        let mut candidate = RawCandidate::new(5, "X");
        candidate.rating = Some(7.2);
        candidate.release_date = Some("1984-10-26".to_string());
        candidate.poster_path = Some("/x.jpg".to_string());

        let card = CardRecord::from_candidate(&candidate, DEFAULT_IMAGE_BASE);

        assert_eq!(card.id, 5);
        assert_eq!(card.title, "X");
        assert_eq!(card.year, Some(1984));
        assert_eq!(card.rating, Some(7.2));
        assert_eq!(card.director, None);
        assert_eq!(card.description, "");
        assert_eq!(
            card.poster.as_deref(),
            Some("https://image.tmdb.org/t/p/w342/x.jpg")
        );
    }

    #[test]
    fn test_raw_candidate_parses_wire_shape() {
        let json = serde_json::json!({
            "id": 603,
            "title": "The Matrix",
            "overview": "Neo wakes up.",
            "poster_path": null,
            "release_date": "1999-03-31",
            "vote_average": 8.2,
            "vote_count": 26000
        });

        let candidate: RawCandidate = serde_json::from_value(json).unwrap();

        assert_eq!(candidate.id, 603);
        assert_eq!(candidate.usable_title(), Some("The Matrix"));
        assert_eq!(candidate.poster_path, None);
        assert_eq!(candidate.rating, Some(8.2));
    }

    #[test]
    fn test_tv_entries_use_name_as_title() {
        let json = serde_json::json!({ "id": 1, "name": "Twin Peaks" });
        let candidate: RawCandidate = serde_json::from_value(json).unwrap();
        assert_eq!(candidate.usable_title(), Some("Twin Peaks"));
    }

    #[test]
    fn test_director_is_first_match() {
        let json = serde_json::json!({
            "id": 1,
            "credits": { "crew": [
                { "job": "Producer", "name": "P" },
                { "job": "Director", "name": "First" },
                { "job": "Director", "name": "Second" }
            ]}
        });
        let detail: MovieDetail = serde_json::from_value(json).unwrap();
        assert_eq!(detail.director(), Some("First"));

        let bare: MovieDetail = serde_json::from_value(serde_json::json!({ "id": 2 })).unwrap();
        assert_eq!(bare.director(), None);
    }

    #[test]
    fn test_card_serializes_nulls_explicitly() {
        let card = CardRecord::from_candidate(&RawCandidate::new(1, "Heat"), DEFAULT_IMAGE_BASE);
        let value = serde_json::to_value(&card).unwrap();

        assert_eq!(value["title"], "Heat");
        assert!(value.get("director").unwrap().is_null());
        assert!(value.get("year").unwrap().is_null());
        assert!(value.get("poster").unwrap().is_null());
        assert!(value.get("rating").unwrap().is_null());
    }

    #[test]
    fn test_decade_bucket_contains() {
        let bucket = DecadeBucket::starting_at(1980);
        assert!(bucket.contains(1980));
        assert!(bucket.contains(1989));
        assert!(!bucket.contains(1990));
    }
}
