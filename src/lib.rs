//! Text and metadata extraction for Word documents (.docx and legacy .doc).

pub mod config;
pub mod types;
pub mod word_extraction;

pub use config::ExtractionConfig;
pub use types::{DocumentKind, DocumentMetadata, ExtractError, ExtractedDocument};
pub use word_extraction::{extract_doc, extract_docx, extract_file};
