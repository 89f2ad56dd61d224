// Legacy .doc fallback chain - ordered strategies, first usable text wins
use std::path::Path;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ExtractionConfig;
use crate::types::ExtractError;

use super::{
    abiword_extraction, antiword_extraction, catdoc_extraction, ole_extraction,
    soffice_extraction,
};

/// Identifier for one legacy extraction strategy. These are the names used
/// in config files, so the chain can be reordered or shortened without
/// touching code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyId {
    Soffice,
    Abiword,
    Antiword,
    Catdoc,
    RawOle,
}

impl StrategyId {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyId::Soffice => "soffice",
            StrategyId::Abiword => "abiword",
            StrategyId::Antiword => "antiword",
            StrategyId::Catdoc => "catdoc",
            StrategyId::RawOle => "raw_ole",
        }
    }

    /// Capability probe: can this strategy run in the current environment?
    /// The raw OLE scrape has no external requirements and is always on.
    pub fn is_available(&self) -> bool {
        match self {
            StrategyId::Soffice => which::which("soffice").is_ok(),
            StrategyId::Abiword => which::which("abiword").is_ok(),
            StrategyId::Antiword => which::which("antiword").is_ok(),
            StrategyId::Catdoc => which::which("catdoc").is_ok(),
            StrategyId::RawOle => true,
        }
    }
}

/// A strategy either cannot run here at all, or ran and produced nothing
/// usable. The chain treats both the same way: remember it, try the next.
#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("{0} not available")]
    Unavailable(&'static str),
    #[error("{0}")]
    Failed(String),
}

/// One entry in the chain: an id plus the function that runs it. Strategies
/// carry no state between invocations.
pub struct Strategy {
    pub id: StrategyId,
    run: Box<dyn Fn(&Path) -> Result<String, StrategyError>>,
}

impl Strategy {
    pub fn new(
        id: StrategyId,
        run: impl Fn(&Path) -> Result<String, StrategyError> + 'static,
    ) -> Self {
        Self {
            id,
            run: Box::new(run),
        }
    }

    pub fn run(&self, doc_path: &Path) -> Result<String, StrategyError> {
        (self.run)(doc_path)
    }
}

/// Outcome of a successful chain run: the text, which strategy produced it,
/// and how long that attempt took.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    pub text: String,
    pub strategy: StrategyId,
    pub elapsed_ms: u64,
}

/// Build the chain in the order the config asks for.
pub fn builtin_strategies(config: &ExtractionConfig) -> Vec<Strategy> {
    let timeout = Duration::from_secs(config.strategy_timeout_secs);
    config
        .strategies
        .iter()
        .map(|id| match id {
            StrategyId::Soffice => Strategy::new(*id, move |path| {
                soffice_extraction::extract_with_soffice(path, timeout)
            }),
            StrategyId::Abiword => Strategy::new(*id, move |path| {
                abiword_extraction::extract_with_abiword(path, timeout)
            }),
            StrategyId::Antiword => Strategy::new(*id, move |path| {
                antiword_extraction::extract_with_antiword(path, timeout)
            }),
            StrategyId::Catdoc => Strategy::new(*id, move |path| {
                catdoc_extraction::extract_with_catdoc(path, timeout)
            }),
            StrategyId::RawOle => {
                Strategy::new(*id, |path| ole_extraction::extract_raw_ole(path))
            }
        })
        .collect()
}

/// Try each strategy in order. The first one whose output is longer than
/// `min_text_len` wins and preempts the rest. When everything fails, the
/// most recent error is surfaced wrapped in [`ExtractError::Exhausted`] -
/// there is no sentinel "could not extract" result.
pub fn run_fallback_chain(
    strategies: &[Strategy],
    doc_path: &Path,
    min_text_len: usize,
) -> Result<ExtractionResult, ExtractError> {
    let mut last_error =
        StrategyError::Failed("no extraction strategies configured".to_string());

    for strategy in strategies {
        let start = Instant::now();
        match strategy.run(doc_path) {
            Ok(text) => {
                let chars = text.chars().count();
                if chars > min_text_len {
                    let elapsed_ms = start.elapsed().as_millis() as u64;
                    tracing::info!(
                        strategy = strategy.id.as_str(),
                        chars,
                        elapsed_ms,
                        "extraction strategy succeeded"
                    );
                    return Ok(ExtractionResult {
                        text,
                        strategy: strategy.id,
                        elapsed_ms,
                    });
                }
                tracing::debug!(
                    strategy = strategy.id.as_str(),
                    chars,
                    min_text_len,
                    "strategy produced too little text, trying next"
                );
                last_error = StrategyError::Failed(format!(
                    "{} produced only {} characters",
                    strategy.id.as_str(),
                    chars
                ));
            }
            Err(err) => {
                tracing::debug!(
                    strategy = strategy.id.as_str(),
                    error = %err,
                    "strategy failed, trying next"
                );
                last_error = err;
            }
        }
    }

    Err(ExtractError::Exhausted { source: last_error })
}
