//! Curated decks offered by the game's deck picker.

use serde::Serialize;

/// A curated TMDb list presented as a deck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CuratedDeck {
    pub key: &'static str,
    pub list_id: &'static str,
    pub label: &'static str,
}

pub const CURATED_DECKS: &[CuratedDeck] = &[
    CuratedDeck {
        key: "mainDeck",
        list_id: "8605209",
        label: "Starter Deck",
    },
    CuratedDeck {
        key: "academyAwardWinnersDeck",
        list_id: "8597868",
        label: "Academy Award Winners",
    },
    CuratedDeck {
        key: "horrorDeck",
        list_id: "8597671",
        label: "Horror",
    },
    CuratedDeck {
        key: "womenDirectorsDeck",
        list_id: "8627695",
        label: "Women Directors",
    },
    CuratedDeck {
        key: "jamesBondDeck",
        list_id: "8604933",
        label: "James Bond",
    },
];

/// Look a curated deck up by key or by list id
pub fn find(key_or_id: &str) -> Option<&'static CuratedDeck> {
    CURATED_DECKS
        .iter()
        .find(|deck| deck.key == key_or_id || deck.list_id == key_or_id)
}
