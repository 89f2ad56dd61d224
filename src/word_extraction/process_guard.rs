// Kill-on-drop wrapper for external converter processes
use std::fs::File;
use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use super::extraction_router::StrategyError;

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const STDERR_SNIPPET_LEN: usize = 300;

#[derive(Debug)]
pub struct GuardOutput {
    pub status: ExitStatus,
    pub stderr: String,
}

/// Scoped handle on an external word-processor process. However the strategy
/// exits - success, parse failure, timeout, early `?` - the child is killed
/// and reaped before the guard goes away.
pub struct ProcessGuard {
    child: Child,
    tool: &'static str,
}

impl ProcessGuard {
    /// Spawn with stdin closed and stderr captured. Callers decide what to
    /// do with stdout (a redirect to a temp file, or null for converters
    /// that write their own output files).
    pub fn spawn(tool: &'static str, command: &mut Command) -> Result<Self, StrategyError> {
        let child = command
            .stdin(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| StrategyError::Failed(format!("failed to launch {tool}: {e}")))?;
        Ok(Self { child, tool })
    }

    /// Block until the process exits, killing it if it outlives the timeout.
    pub fn wait_with_timeout(mut self, timeout: Duration) -> Result<GuardOutput, StrategyError> {
        let deadline = Instant::now() + timeout;
        loop {
            match self.child.try_wait() {
                Ok(Some(status)) => {
                    let mut stderr = String::new();
                    if let Some(mut pipe) = self.child.stderr.take() {
                        let _ = pipe.read_to_string(&mut stderr);
                    }
                    if stderr.len() > STDERR_SNIPPET_LEN {
                        let mut cut = STDERR_SNIPPET_LEN;
                        while !stderr.is_char_boundary(cut) {
                            cut -= 1;
                        }
                        stderr.truncate(cut);
                    }
                    return Ok(GuardOutput { status, stderr });
                }
                Ok(None) => {
                    if Instant::now() >= deadline {
                        tracing::warn!(tool = self.tool, ?timeout, "external process timed out, killing");
                        return Err(StrategyError::Failed(format!(
                            "{} timed out after {}s",
                            self.tool,
                            timeout.as_secs()
                        )));
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                Err(e) => {
                    return Err(StrategyError::Failed(format!(
                        "failed waiting for {}: {e}",
                        self.tool
                    )))
                }
            }
        }
    }
}

impl Drop for ProcessGuard {
    fn drop(&mut self) {
        if !matches!(self.child.try_wait(), Ok(Some(_))) {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

/// Run a converter that writes its text to stdout. The stream is redirected
/// to a temp file rather than a pipe so a large document can never fill the
/// pipe buffer and wedge a single-threaded wait.
pub fn capture_stdout(
    tool: &'static str,
    command: &mut Command,
    timeout: Duration,
) -> Result<String, StrategyError> {
    let out_dir = tempfile::tempdir()
        .map_err(|e| StrategyError::Failed(format!("failed to create temp dir: {e}")))?;
    let out_path = out_dir.path().join("stdout.txt");
    let out_file = File::create(&out_path)
        .map_err(|e| StrategyError::Failed(format!("failed to create temp file: {e}")))?;

    command.stdout(Stdio::from(out_file));
    let guard = ProcessGuard::spawn(tool, command)?;
    let output = guard.wait_with_timeout(timeout)?;

    if !output.status.success() {
        return Err(StrategyError::Failed(format!(
            "{tool} exited with {}: {}",
            output.status,
            output.stderr.trim()
        )));
    }

    let bytes = std::fs::read(&out_path)
        .map_err(|e| StrategyError::Failed(format!("failed to read {tool} output: {e}")))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn guard_kills_processes_that_outlive_the_timeout() {
        let mut command = Command::new("sleep");
        command.arg("5").stdout(Stdio::null());
        let guard = ProcessGuard::spawn("sleep", &mut command).unwrap();

        let start = Instant::now();
        let err = guard.wait_with_timeout(Duration::from_millis(200)).unwrap_err();
        assert!(err.to_string().contains("timed out"));
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[cfg(unix)]
    #[test]
    fn capture_stdout_returns_process_output() {
        let mut command = Command::new("echo");
        command.arg("captured line");
        let text = capture_stdout("echo", &mut command, Duration::from_secs(5)).unwrap();
        assert_eq!(text.trim_end(), "captured line");
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_is_a_failure() {
        let mut command = Command::new("false");
        let err = capture_stdout("false", &mut command, Duration::from_secs(5)).unwrap_err();
        assert!(err.to_string().contains("exited with"));
    }
}
