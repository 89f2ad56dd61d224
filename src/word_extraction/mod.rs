// Word document extraction pipelines
pub mod abiword_extraction;
pub mod antiword_extraction;
pub mod catdoc_extraction;
pub mod docx_extraction;
pub mod extraction_router;
pub mod ole_extraction;
pub mod process_guard;
pub mod soffice_extraction;

pub use docx_extraction::extract_docx;
pub use extraction_router::{
    builtin_strategies, run_fallback_chain, ExtractionResult, Strategy, StrategyError,
    StrategyId,
};

use std::fs;
use std::path::Path;

use crate::config::ExtractionConfig;
use crate::types::{DocumentKind, DocumentMetadata, ExtractError, ExtractedDocument};

/// Dispatch on the file extension. The two pipelines share nothing beyond
/// the result type.
pub fn extract_file(
    path: &Path,
    config: &ExtractionConfig,
) -> Result<ExtractedDocument, ExtractError> {
    match DocumentKind::from_path(path) {
        Some(DocumentKind::Docx) => extract_docx(path),
        Some(DocumentKind::Doc) => extract_doc(path, config),
        None => Err(ExtractError::UnsupportedExtension(
            path.extension()
                .and_then(|e| e.to_str())
                .unwrap_or("")
                .to_string(),
        )),
    }
}

/// Legacy `.doc` pipeline: run the configured fallback chain. Metadata here
/// is always the default page count of 1 plus the file's byte size - the
/// binary format gives up nothing more without a full parser.
pub fn extract_doc(
    path: &Path,
    config: &ExtractionConfig,
) -> Result<ExtractedDocument, ExtractError> {
    let file_size = fs::metadata(path)?.len();

    if tracing::enabled!(tracing::Level::DEBUG) {
        for id in &config.strategies {
            tracing::debug!(strategy = id.as_str(), available = id.is_available(), "probe");
        }
    }

    let strategies = builtin_strategies(config);
    let result = run_fallback_chain(&strategies, path, config.min_text_len)?;

    Ok(ExtractedDocument {
        text: result.text,
        metadata: DocumentMetadata {
            page_count: 1,
            file_size,
            paragraph_count: None,
            has_tables: None,
        },
    })
}
