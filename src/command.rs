//! External tool invocation with a bounded wait

use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::adaptor::AdaptorError;
use crate::constants;

/// Captured result of a finished tool run
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

/// Runs the device configuration tool with the given arguments
pub trait ToolRunner {
    fn run(&self, args: &[String]) -> Result<ToolOutput, AdaptorError>;

    /// Program name used in diagnostics
    fn program(&self) -> String;
}

pub struct ProcessRunner {
    program: PathBuf,
    timeout: Duration,
}

impl ProcessRunner {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    fn describe(&self, args: &[String]) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(args.iter().map(|arg| format!("{arg:?}")));
        parts.join(" ")
    }

    fn timed_out(&self, command: &str) -> AdaptorError {
        AdaptorError::Timeout {
            command: command.to_string(),
            timeout: self.timeout,
        }
    }

    fn wait_bounded(&self, child: &mut Child, command: &str, deadline: Instant) -> Result<ExitStatus, AdaptorError> {
        let poll = Duration::from_millis(constants::command::POLL_INTERVAL_MS);

        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) if Instant::now() >= deadline => {
                    warn!(command, timeout = ?self.timeout, "Tool did not finish in time, killing it");
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(self.timed_out(command));
                }
                Ok(None) => thread::sleep(poll),
                Err(e) => {
                    let _ = child.kill();
                    return Err(AdaptorError::Execution {
                        command: command.to_string(),
                        reason: format!("failed to wait for process: {e}"),
                    });
                }
            }
        }
    }

    /// Wait for both pipe readers; a pipe inherited by a process the tool left
    /// behind stays open, so this is bounded by the same deadline
    fn collect_output(
        &self,
        output: &mpsc::Receiver<(Stream, String)>,
        command: &str,
        deadline: Instant,
    ) -> Result<(String, String), AdaptorError> {
        let (mut stdout, mut stderr) = (String::new(), String::new());
        let grace = Duration::from_millis(constants::command::POLL_INTERVAL_MS);

        for _ in 0..2 {
            let remaining = deadline.saturating_duration_since(Instant::now()).max(grace);
            match output.recv_timeout(remaining) {
                Ok((Stream::Stdout, text)) => stdout = text,
                Ok((Stream::Stderr, text)) => stderr = text,
                Err(RecvTimeoutError::Timeout) => {
                    warn!(command, timeout = ?self.timeout, "Tool output still open after exit, giving up");
                    return Err(self.timed_out(command));
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        Ok((stdout, stderr))
    }
}

#[derive(Debug, Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>, stream: Stream, output: Sender<(Stream, String)>) {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buffer);
        }
        let _ = output.send((stream, String::from_utf8_lossy(&buffer).into_owned()));
    });
}

impl ToolRunner for ProcessRunner {
    fn run(&self, args: &[String]) -> Result<ToolOutput, AdaptorError> {
        let command = self.describe(args);
        debug!(command = %command, "Running tool");

        let mut child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => AdaptorError::DeviceUnavailable {
                    device: self.program.display().to_string(),
                    reason: "tool not found".to_string(),
                },
                _ => AdaptorError::Execution {
                    command: command.clone(),
                    reason: format!("failed to start: {e}"),
                },
            })?;

        // Pipes are drained concurrently so a chatty tool can not block on a full pipe
        let (sender, output) = mpsc::channel();
        drain(child.stdout.take(), Stream::Stdout, sender.clone());
        drain(child.stderr.take(), Stream::Stderr, sender);

        let deadline = Instant::now() + self.timeout;
        let status = self.wait_bounded(&mut child, &command, deadline)?;
        let (stdout, stderr) = self.collect_output(&output, &command, deadline)?;

        debug!(command = %command, %status, stdout = %stdout.trim_end(), stderr = %stderr.trim_end(), "Tool finished");

        Ok(ToolOutput {
            stdout,
            stderr,
            success: status.success(),
        })
    }

    fn program(&self) -> String {
        self.program.display().to_string()
    }
}

/// Default runner for `xsetwacom` found on PATH or at `program`
pub fn xsetwacom_runner(program: Option<&Path>, timeout: Duration) -> ProcessRunner {
    let program = program
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(constants::xsetwacom::PROGRAM));
    ProcessRunner::new(program, timeout)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str, timeout_ms: u64) -> Result<ToolOutput, AdaptorError> {
        ProcessRunner::new("/bin/sh", Duration::from_millis(timeout_ms))
            .run(&["-c".to_string(), script.to_string()])
    }

    #[test]
    fn test_captures_stdout() {
        let output = sh("echo 'button +1 '", 5_000).unwrap();
        assert_eq!(output.stdout, "button +1 \n");
        assert!(output.stderr.is_empty());
        assert!(output.success);
    }

    #[test]
    fn test_captures_stderr_and_status() {
        let output = sh("echo 'Cannot find device' >&2; exit 1", 5_000).unwrap();
        assert_eq!(output.stderr.trim(), "Cannot find device");
        assert!(!output.success);
    }

    #[test]
    fn test_timeout_kills_process() {
        let started = Instant::now();
        let result = sh("sleep 10", 200);
        assert!(matches!(result, Err(AdaptorError::Timeout { .. })));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_leftover_background_process_does_not_block() {
        let started = Instant::now();
        let result = sh("sleep 4 & echo hi", 200);
        assert!(matches!(result, Err(AdaptorError::Timeout { .. })));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn test_missing_program_is_unavailable() {
        let runner = ProcessRunner::new("/nonexistent/xsetwacom", Duration::from_secs(1));
        assert!(matches!(
            runner.run(&["get".to_string()]),
            Err(AdaptorError::DeviceUnavailable { .. })
        ));
    }

    #[test]
    fn test_default_program() {
        let runner = xsetwacom_runner(None, Duration::from_secs(1));
        assert_eq!(runner.program(), "xsetwacom");
        let runner = xsetwacom_runner(Some(Path::new("/opt/bin/xsetwacom")), Duration::from_secs(1));
        assert_eq!(runner.program(), "/opt/bin/xsetwacom");
    }
}
