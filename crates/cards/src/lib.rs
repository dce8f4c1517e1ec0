//! Card model shared by every stage of deck assembly.
//!
//! This crate defines the shapes that move through the pipeline:
//! - [`RawCandidate`]: a movie as it appears on a discover page or a curated list
//! - [`MovieDetail`]: the authoritative detail record (with credits)
//! - [`CardRecord`]: the normalized card handed to the game board
//! - [`DecadeBucket`]: an inclusive ten year window used for stratified sampling
//!
//! ## Example Usage
//!
//! ```ignore
//! use cards::{CardRecord, RawCandidate};
//!
//! let candidate: RawCandidate = serde_json::from_value(item)?;
//! let card = CardRecord::from_candidate(&candidate, cards::DEFAULT_IMAGE_BASE);
//! ```

pub mod types;

// Re-export commonly used types
pub use types::{
    CardRecord, CrewMember, Credits, DEFAULT_IMAGE_BASE, DecadeBucket, MovieDetail, MovieId,
    RawCandidate, parse_year, poster_url,
};
