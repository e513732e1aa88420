//! Process execution capability.
//!
//! The orchestrator talks to the enumeration tool only through [`Executor`],
//! so parsing and state handling can be exercised against canned output.

use crate::error::ExecError;
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Captured result of one process run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    /// Standard output, lossily decoded as UTF-8
    pub stdout: String,
    /// Standard error, lossily decoded as UTF-8
    pub stderr: String,
    /// Exit code; `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
}

impl ExecOutput {
    /// Whether the process exited with status 0.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Capability to run a program with arguments under a time bound.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Run `program` with `args`, capturing both output streams.
    ///
    /// Output is captured whatever the exit status. Arguments are passed
    /// as a vector, never through a shell.
    ///
    /// # Errors
    /// `ExecError::NotFound` if the program cannot be located,
    /// `ExecError::TimedOut` if it outlives `timeout`.
    async fn run(
        &self,
        program: &str,
        args: &[String],
        timeout: Duration,
    ) -> Result<ExecOutput, ExecError>;
}

/// Executor backed by `tokio::process`. The child is killed if the bound elapses.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor;

#[async_trait]
impl Executor for ProcessExecutor {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        timeout: Duration,
    ) -> Result<ExecOutput, ExecError> {
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ExecError::NotFound {
                        program: program.to_string(),
                    }
                } else {
                    ExecError::Io(e)
                }
            })?;

        tracing::debug!(program, timeout_secs = timeout.as_secs(), "spawned external process");

        let output = tokio::time::timeout(timeout, child.wait_with_output())
            .await
            .map_err(|_| ExecError::TimedOut { after: timeout })??;

        Ok(ExecOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> Vec<String> {
        vec!["-c".to_string(), script.to_string()]
    }

    #[tokio::test]
    async fn test_captures_streams_and_exit_code() {
        let output = ProcessExecutor
            .run(
                "sh",
                &sh("echo '[+] Twitter'; echo 'oops' >&2; exit 3"),
                Duration::from_secs(10),
            )
            .await
            .expect("sh runs");

        assert_eq!(output.stdout, "[+] Twitter\n");
        assert_eq!(output.stderr, "oops\n");
        assert_eq!(output.exit_code, Some(3));
        assert!(!output.success());
    }

    #[tokio::test]
    async fn test_arguments_are_not_shell_interpreted() {
        let output = ProcessExecutor
            .run(
                "echo",
                &["a@b.co; echo injected".to_string()],
                Duration::from_secs(10),
            )
            .await
            .expect("echo runs");

        assert_eq!(output.stdout, "a@b.co; echo injected\n");
        assert!(output.success());
    }

    #[tokio::test]
    async fn test_missing_program() {
        let result = ProcessExecutor
            .run(
                "definitely-not-an-installed-tool-7f3a",
                &[],
                Duration::from_secs(10),
            )
            .await;

        assert!(matches!(result, Err(ExecError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_timeout_kills_process() {
        let result = ProcessExecutor
            .run("sh", &sh("sleep 5"), Duration::from_millis(100))
            .await;

        assert!(matches!(result, Err(ExecError::TimedOut { .. })));
    }
}
