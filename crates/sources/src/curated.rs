//! Curated List Source (Mode B)
//!
//! Every movie of a curated TMDb list becomes a candidate, in list order.
//! There is no sampling: the curator's order is the deck's order.

use cards::RawCandidate;
use tmdb_client::{Result, TmdbClient};
use tracing::{info, instrument};

use crate::usable;

/// Mode B candidate source
#[derive(Clone)]
pub struct CuratedListSource {
    client: TmdbClient,
}

impl CuratedListSource {
    pub fn new(client: TmdbClient) -> Self {
        Self { client }
    }

    /// Fetch the list once and return its items in order.
    ///
    /// A list without an `items` array yields no candidates rather than an
    /// error. A non-success response is returned to the caller untouched.
    #[instrument(skip(self))]
    pub async fn sample(&self, list_id: &str) -> Result<Vec<RawCandidate>> {
        let list = self.client.list(list_id).await?;

        let Some(items) = list.items else {
            info!("List {} has no items", list_id);
            return Ok(Vec::new());
        };

        let candidates = usable(items);
        info!("List {} provided {} candidates", list_id, candidates.len());
        Ok(candidates)
    }
}
