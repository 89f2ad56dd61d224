// catdoc - general-purpose converter, less picky than antiword about damage
use std::path::Path;
use std::process::Command;
use std::time::Duration;

use super::extraction_router::StrategyError;
use super::process_guard::capture_stdout;

pub fn extract_with_catdoc(doc_path: &Path, timeout: Duration) -> Result<String, StrategyError> {
    which::which("catdoc").map_err(|_| StrategyError::Unavailable("catdoc"))?;

    let mut command = Command::new("catdoc");
    command.arg(doc_path);
    capture_stdout("catdoc", &mut command, timeout)
}
