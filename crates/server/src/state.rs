use std::sync::Arc;

use config::{Config, DeckMode};
use sources::DeckRng;

use crate::orchestrator::DeckAssembler;

#[derive(Clone)]
pub struct AppState {
    pub assembler: Arc<DeckAssembler>,
    pub mode: DeckMode,
}

impl AppState {
    pub fn new(assembler: DeckAssembler, mode: DeckMode) -> Self {
        Self {
            assembler: Arc::new(assembler),
            mode,
        }
    }

    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        let assembler = DeckAssembler::from_config(cfg, DeckRng::from_entropy())?;
        Ok(Self::new(assembler, cfg.deck.mode))
    }
}
