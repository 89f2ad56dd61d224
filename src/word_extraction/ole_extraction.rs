// Last resort - scrape printable text straight out of the WordDocument stream.
// Lossy and incomplete by construction; only runs when every converter failed.
use std::fs::File;
use std::io::Read;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use super::extraction_router::StrategyError;

static NON_PRINTABLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\x20-\x7E\r\n]+").unwrap());
static WHITESPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

pub fn extract_raw_ole(doc_path: &Path) -> Result<String, StrategyError> {
    let file = File::open(doc_path).map_err(|e| {
        StrategyError::Failed(format!("cannot open {}: {e}", doc_path.display()))
    })?;
    let mut ole = cfb::CompoundFile::open(file)
        .map_err(|e| StrategyError::Failed(format!("not a valid OLE file: {e}")))?;

    if !ole.exists("WordDocument") {
        return Err(StrategyError::Failed(
            "no WordDocument stream in OLE container".to_string(),
        ));
    }

    let mut raw = Vec::new();
    ole.open_stream("WordDocument")
        .and_then(|mut stream| stream.read_to_end(&mut raw))
        .map_err(|e| StrategyError::Failed(format!("cannot read WordDocument stream: {e}")))?;

    Ok(scrape_printable(&raw))
}

/// Keep printable ASCII (plus CR/LF), then flatten every whitespace run to
/// a single space.
fn scrape_printable(raw: &[u8]) -> String {
    let lossy = String::from_utf8_lossy(raw);
    let printable = NON_PRINTABLE.replace_all(&lossy, "");
    let collapsed = WHITESPACE_RUNS.replace_all(&printable, " ");
    collapsed.trim().to_string()
}
