//! Errors a deck request can end with.

use thiserror::Error;
use tmdb_client::TmdbError;

#[derive(Error, Debug)]
pub enum DeckError {
    /// The request itself is unusable; nothing was sent upstream.
    #[error("{message}")]
    ClientRequest { message: String },

    /// A call the deck cannot do without answered with a non-success status.
    #[error("TMDb request failed with status {status}")]
    Upstream { status: u16, body: String },

    /// A call the deck cannot do without never got a usable answer.
    #[error("TMDb is unavailable: {message}")]
    UpstreamUnavailable { message: String },
}

impl DeckError {
    pub fn client(message: impl Into<String>) -> Self {
        DeckError::ClientRequest {
            message: message.into(),
        }
    }
}

impl From<TmdbError> for DeckError {
    fn from(err: TmdbError) -> Self {
        match err {
            TmdbError::Status { status, body } => DeckError::Upstream { status, body },
            TmdbError::PathSegment(segment) => {
                DeckError::client(format!("{segment:?} is not a usable identifier"))
            }
            other => DeckError::UpstreamUnavailable {
                message: other.to_string(),
            },
        }
    }
}
