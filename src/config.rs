// Extraction configuration - the legacy strategy chain is data, not hardwired logic
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::word_extraction::extraction_router::StrategyId;

pub const DEFAULT_MIN_TEXT_LEN: usize = 10;
pub const DEFAULT_STRATEGY_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Legacy-format strategies, attempted in order. Order matters: the
    /// first one producing usable text preempts everything after it.
    #[serde(default = "default_strategy_order")]
    pub strategies: Vec<StrategyId>,
    /// A strategy result this short (or shorter) counts as a failure.
    #[serde(default = "default_min_text_len")]
    pub min_text_len: usize,
    /// Hard ceiling on each external converter process.
    #[serde(default = "default_timeout_secs")]
    pub strategy_timeout_secs: u64,
}

fn default_strategy_order() -> Vec<StrategyId> {
    vec![
        StrategyId::Soffice,
        StrategyId::Abiword,
        StrategyId::Antiword,
        StrategyId::Catdoc,
        StrategyId::RawOle,
    ]
}

fn default_min_text_len() -> usize {
    DEFAULT_MIN_TEXT_LEN
}

fn default_timeout_secs() -> u64 {
    DEFAULT_STRATEGY_TIMEOUT_SECS
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            strategies: default_strategy_order(),
            min_text_len: DEFAULT_MIN_TEXT_LEN,
            strategy_timeout_secs: DEFAULT_STRATEGY_TIMEOUT_SECS,
        }
    }
}

impl ExtractionConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
    }
}
