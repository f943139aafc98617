//! Mock command runner for testing.
//!
//! `MockRunner` answers every command with a pre-configured reply and
//! records what was asked.
//!
//! # Example
//!
//! ```
//! use cloudctx::shell::{CommandRunner, MockRunner};
//!
//! let runner = MockRunner::replying("us-west-2\n", 0);
//! let out = runner.run("aws", &["configure", "get", "region"]).unwrap();
//! assert_eq!(out.trimmed(), "us-west-2");
//! assert_eq!(runner.calls(), vec!["aws configure get region".to_string()]);
//! ```

use std::sync::Mutex;

use crate::error::{ContextError, Result};

use super::{CommandOutput, CommandRunner};

#[derive(Debug, Clone)]
enum Reply {
    Output(CommandOutput),
    SpawnFailure,
}

/// Mock command runner.
#[derive(Debug)]
pub struct MockRunner {
    reply: Reply,
    calls: Mutex<Vec<String>>,
}

impl MockRunner {
    /// Reply to every command with `output` and `exit_code`.
    pub fn replying(output: &str, exit_code: i32) -> Self {
        Self {
            reply: Reply::Output(CommandOutput::new(output, Some(exit_code))),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fail every command as if the program could not be started.
    pub fn failing_to_spawn() -> Self {
        Self {
            reply: Reply::SpawnFailure,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every command run so far, as `[KEY=value ...] program arg1 arg2 ...`.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of commands run so far.
    pub fn call_count(&self) -> usize {
        self.calls().len()
    }
}

impl CommandRunner for MockRunner {
    fn run_with_env(
        &self,
        program: &str,
        args: &[&str],
        env: &[(&str, &str)],
    ) -> Result<CommandOutput> {
        let mut command: Vec<String> = env.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        command.push(program.to_string());
        command.extend(args.iter().map(|a| a.to_string()));
        let command = command.join(" ");
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(command.clone());

        match &self.reply {
            Reply::Output(output) => Ok(output.clone()),
            Reply::SpawnFailure => Err(ContextError::CommandFailed {
                command,
                code: None,
            }),
        }
    }
}
