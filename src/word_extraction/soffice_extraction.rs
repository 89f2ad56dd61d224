// LibreOffice automation - convert the .doc to plain text in a scratch dir
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;

use super::extraction_router::StrategyError;
use super::process_guard::ProcessGuard;

/// Drives a headless LibreOffice process: open the document, convert to
/// text, quit. The TempDir and the process guard make sure both the scratch
/// output and the soffice process are gone on every exit path.
pub fn extract_with_soffice(doc_path: &Path, timeout: Duration) -> Result<String, StrategyError> {
    which::which("soffice").map_err(|_| StrategyError::Unavailable("soffice"))?;

    let doc_path = doc_path.canonicalize().map_err(|e| {
        StrategyError::Failed(format!("cannot resolve {}: {e}", doc_path.display()))
    })?;
    let out_dir = tempfile::tempdir()
        .map_err(|e| StrategyError::Failed(format!("failed to create temp dir: {e}")))?;

    let mut command = Command::new("soffice");
    command
        .args(["--headless", "--convert-to", "txt:Text", "--outdir"])
        .arg(out_dir.path())
        .arg(&doc_path)
        .stdout(Stdio::null());

    let guard = ProcessGuard::spawn("soffice", &mut command)?;
    let output = guard.wait_with_timeout(timeout)?;
    if !output.status.success() {
        return Err(StrategyError::Failed(format!(
            "soffice exited with {}: {}",
            output.status,
            output.stderr.trim()
        )));
    }

    let stem = doc_path
        .file_stem()
        .ok_or_else(|| StrategyError::Failed("document path has no file name".to_string()))?;
    let converted = out_dir.path().join(stem).with_extension("txt");
    let bytes = std::fs::read(&converted).map_err(|e| {
        StrategyError::Failed(format!("soffice produced no text output: {e}"))
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
