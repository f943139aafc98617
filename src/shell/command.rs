//! Local command execution.
//!
//! The CLI probe and the CLI identity client only need "run this
//! program with these arguments, give me its text and exit code". That
//! capability is the [`CommandRunner`] trait so tests can script it.

use crate::error::{ContextError, Result};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Combined output of a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Standard output followed by standard error.
    pub output: String,

    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    /// Create an output record.
    pub fn new(output: impl Into<String>, exit_code: Option<i32>) -> Self {
        Self {
            output: output.into(),
            exit_code,
        }
    }

    /// Whether the command exited with code 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// The output with surrounding whitespace removed.
    pub fn trimmed(&self) -> &str {
        self.output.trim()
    }
}

/// Runs a program to completion and reports what it printed.
///
/// There is no timeout: a hung program hangs the caller.
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` and extra environment variables, capturing
    /// stdout and stderr together.
    ///
    /// # Errors
    ///
    /// Returns `CommandFailed` when the program cannot be started.
    fn run_with_env(
        &self,
        program: &str,
        args: &[&str],
        env: &[(&str, &str)],
    ) -> Result<CommandOutput>;

    /// Run `program` with `args` in the inherited environment.
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        self.run_with_env(program, args, &[])
    }
}

/// Runs commands as child processes of the current process.
///
/// The child inherits the process environment, so a region exported by the
/// account lookup is visible to it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a runner.
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run_with_env(
        &self,
        program: &str,
        args: &[&str],
        env: &[(&str, &str)],
    ) -> Result<CommandOutput> {
        let start = Instant::now();
        let command_line = display_command(program, args);

        let output = Command::new(program)
            .args(args)
            .envs(env.iter().copied())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| {
                tracing::debug!("Failed to start `{}`: {}", command_line, e);
                ContextError::CommandFailed {
                    command: command_line.clone(),
                    code: None,
                }
            })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        let result = CommandOutput::new(combined, output.status.code());
        log_finished(&command_line, &result, start.elapsed());
        Ok(result)
    }
}

fn display_command(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}

fn log_finished(command_line: &str, result: &CommandOutput, duration: Duration) {
    tracing::debug!(
        "`{}` exited with {:?} after {}ms",
        command_line,
        result.exit_code,
        duration.as_millis()
    );
}
