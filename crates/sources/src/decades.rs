//! Decade windows for stratified sampling.

use cards::DecadeBucket;
use chrono::{Datelike, Utc};

/// First decade a stratified deck draws from
pub const FIRST_DECADE: i32 = 1950;

/// Contiguous ten year buckets from 1950 up to the decade containing
/// `current_year`, e.g. 1950..=1959, ..., 2020..=2029 for 2024.
pub fn build_decade_buckets(current_year: i32) -> Vec<DecadeBucket> {
    let last_decade = current_year.div_euclid(10) * 10;
    (FIRST_DECADE..=last_decade)
        .step_by(10)
        .map(DecadeBucket::starting_at)
        .collect()
}

/// Buckets for today's date, computed at call time so the range tracks the present
pub fn current_decade_buckets() -> Vec<DecadeBucket> {
    build_decade_buckets(Utc::now().year())
}
