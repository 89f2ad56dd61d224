// Core types for Word document extraction
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::word_extraction::extraction_router::StrategyError;

/// Everything recovered from one document: the full text plus coarse metadata.
/// Built once per processed file and fully materialized before return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    pub text: String,
    pub metadata: DocumentMetadata,
}

/// Coarse per-document metadata. The legacy pipeline only knows the page
/// count default and the byte size, so the docx-only fields stay `None`
/// there and are omitted from JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub page_count: usize,
    pub file_size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraph_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_tables: Option<bool>,
}

/// Which pipeline handles the file, decided from its extension. The caller
/// picks the file; there is no content sniffing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Docx,
    Doc,
}

impl DocumentKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "docx" => Some(DocumentKind::Docx),
            "doc" => Some(DocumentKind::Doc),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ExtractError {
    /// Modern pipeline: any open/parse failure, wrapped. No fallback chain.
    #[error("error processing Word document: {0}")]
    Parse(String),
    /// Legacy pipeline: every strategy failed; carries the most recent cause.
    #[error("failed to extract text from doc file after trying all strategies: {source}")]
    Exhausted {
        #[source]
        source: StrategyError,
    },
    #[error("unsupported document extension: {0:?}")]
    UnsupportedExtension(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
