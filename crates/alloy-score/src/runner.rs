//! Tool execution.

use crate::classifier;
use crate::command::ToolCommand;
use crate::error::RunError;
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tracing::debug;

/// Captured result of a finished tool process.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Invocation name.
    pub tool_name: String,

    /// Exit code (0 = success, -1 when killed by a signal).
    pub exit_code: i32,

    /// Captured stdout.
    pub stdout: String,

    /// Captured stderr.
    pub stderr: String,

    /// Duration in milliseconds.
    pub duration_ms: u64,

    /// Whether the process reported success.
    pub success: bool,
}

impl ToolOutput {
    /// Whether this invocation passed (exit code 0).
    pub fn passed(&self) -> bool {
        self.success && classifier::is_valid_exit(self.exit_code)
    }

    /// stdout followed by stderr.
    pub fn combined(&self) -> String {
        classifier::combine_streams(&self.stdout, &self.stderr)
    }
}

/// Backend that executes tool invocations.
#[async_trait]
pub trait ToolRunner: Send + Sync {
    /// Run `command` to completion or until its timeout elapses.
    async fn run(&self, command: &ToolCommand) -> std::result::Result<ToolOutput, RunError>;
}

/// Runs tools as child processes.
///
/// A process that outlives its timeout is killed when the pending wait is
/// dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

#[async_trait]
impl ToolRunner for ProcessRunner {
    async fn run(&self, command: &ToolCommand) -> std::result::Result<ToolOutput, RunError> {
        let start = Instant::now();

        if command.program.is_empty() {
            return Err(RunError::EmptyCommand(command.name.clone()));
        }

        debug!(tool = %command.name, command = %command.command_line(), "Launching tool");

        let mut process = Command::new(&command.program);
        process
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &command.current_dir {
            process.current_dir(dir);
        }

        let spawn_error = |source| RunError::Spawn {
            tool: command.name.clone(),
            source,
        };

        let child = process.spawn().map_err(spawn_error)?;

        let limit = command.timeout();
        let output = tokio::time::timeout(limit, child.wait_with_output())
            .await
            .map_err(|_| RunError::Timeout {
                tool: command.name.clone(),
                limit,
            })?
            .map_err(spawn_error)?;

        let duration_ms = start.elapsed().as_millis() as u64;
        let exit_code = output.status.code().unwrap_or(-1);
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        debug!(tool = %command.name, exit_code, duration_ms, "Tool exited");

        Ok(ToolOutput {
            tool_name: command.name.clone(),
            exit_code,
            stdout,
            stderr,
            duration_ms,
            success: output.status.success(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_tool_output_passed() {
        let output = ToolOutput {
            tool_name: "analyzer_exec".to_string(),
            exit_code: 0,
            stdout: "".to_string(),
            stderr: "".to_string(),
            duration_ms: 100,
            success: true,
        };
        assert!(output.passed());
    }

    #[test]
    fn test_tool_output_failed() {
        let output = ToolOutput {
            tool_name: "analyzer_exec".to_string(),
            exit_code: 1,
            stdout: "".to_string(),
            stderr: "Syntax error at line 3".to_string(),
            duration_ms: 100,
            success: false,
        };
        assert!(!output.passed());
    }

    #[test]
    fn test_tool_output_combined() {
        let output = ToolOutput {
            tool_name: "module_diff".to_string(),
            exit_code: 0,
            stdout: "checking\n".to_string(),
            stderr: "done\n".to_string(),
            duration_ms: 5,
            success: true,
        };
        assert_eq!(output.combined(), "checking\ndone\n");
    }

    #[tokio::test]
    async fn test_run_simple_command() {
        let cmd = ToolCommand::custom("echo_test", "echo", vec!["hello".into()], 60);

        let output = ProcessRunner.run(&cmd).await.expect("run failed");
        assert!(output.success);
        assert_eq!(output.exit_code, 0);
        assert!(output.stdout.contains("hello"));
    }

    #[tokio::test]
    async fn test_run_failing_command() {
        let cmd = ToolCommand::custom("false_test", "false", vec![], 60);

        let output = ProcessRunner.run(&cmd).await.expect("run failed");
        assert!(!output.success);
        assert_ne!(output.exit_code, 0);
    }

    #[tokio::test]
    async fn test_run_captures_stderr() {
        let cmd = ToolCommand::custom(
            "stderr_test",
            "sh",
            vec!["-c".into(), "echo oops >&2; exit 3".into()],
            60,
        );

        let output = ProcessRunner.run(&cmd).await.expect("run failed");
        assert_eq!(output.exit_code, 3);
        assert!(output.stderr.contains("oops"));
        assert!(output.stdout.is_empty());
    }

    #[tokio::test]
    async fn test_run_in_dir() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = ToolCommand::custom("touch_test", "touch", vec!["marker".into()], 60)
            .in_dir(dir.path());

        let output = ProcessRunner.run(&cmd).await.expect("run failed");
        assert!(output.passed());
        assert!(dir.path().join("marker").exists());
    }

    #[tokio::test]
    async fn test_run_times_out() {
        let cmd = ToolCommand::custom("sleep_test", "sleep", vec!["10".into()], 1);

        let start = Instant::now();
        let err = ProcessRunner.run(&cmd).await.unwrap_err();
        assert!(matches!(err, RunError::Timeout { .. }));
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let cmd = ToolCommand::custom("missing", "definitely-not-a-real-binary-7f3a", vec![], 60);

        let err = ProcessRunner.run(&cmd).await.unwrap_err();
        assert!(matches!(err, RunError::Spawn { .. }));
    }

    #[tokio::test]
    async fn test_empty_program() {
        let cmd = ToolCommand::custom("empty", "", vec![], 60);

        let err = ProcessRunner.run(&cmd).await.unwrap_err();
        assert!(matches!(err, RunError::EmptyCommand(name) if name == "empty"));
    }
}
