// AbiWord automation - the second external word processor in the chain
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;

use super::extraction_router::StrategyError;
use super::process_guard::ProcessGuard;

pub fn extract_with_abiword(doc_path: &Path, timeout: Duration) -> Result<String, StrategyError> {
    which::which("abiword").map_err(|_| StrategyError::Unavailable("abiword"))?;

    let doc_path = doc_path.canonicalize().map_err(|e| {
        StrategyError::Failed(format!("cannot resolve {}: {e}", doc_path.display()))
    })?;
    let out_dir = tempfile::tempdir()
        .map_err(|e| StrategyError::Failed(format!("failed to create temp dir: {e}")))?;
    let out_path = out_dir.path().join("converted.txt");

    let mut command = Command::new("abiword");
    command
        .arg("--to=txt")
        .arg(format!("--to-name={}", out_path.display()))
        .arg(&doc_path)
        .stdout(Stdio::null());

    let guard = ProcessGuard::spawn("abiword", &mut command)?;
    let output = guard.wait_with_timeout(timeout)?;
    if !output.status.success() {
        return Err(StrategyError::Failed(format!(
            "abiword exited with {}: {}",
            output.status,
            output.stderr.trim()
        )));
    }

    let bytes = std::fs::read(&out_path).map_err(|e| {
        StrategyError::Failed(format!("abiword produced no text output: {e}"))
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
