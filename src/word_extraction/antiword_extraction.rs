// antiword - the dedicated .doc-to-text converter
use std::path::Path;
use std::process::Command;
use std::time::Duration;

use super::extraction_router::StrategyError;
use super::process_guard::capture_stdout;

pub fn extract_with_antiword(doc_path: &Path, timeout: Duration) -> Result<String, StrategyError> {
    which::which("antiword").map_err(|_| StrategyError::Unavailable("antiword"))?;

    let mut command = Command::new("antiword");
    command.arg(doc_path);
    capture_stdout("antiword", &mut command, timeout)
}
