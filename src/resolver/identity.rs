//! Caller identity lookup.
//!
//! The account resolver only needs "which account do the ambient
//! credentials belong to". [`IdentityClient`] is that capability. The
//! default is the SDK-backed [`StsIdentityClient`](super::StsIdentityClient);
//! [`CliIdentityClient`] asks the AWS CLI instead.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::environment::EnvironmentView;
use crate::error::{ContextError, IdentityError};
use crate::shell::{find_executable, CommandOutput, CommandRunner};

/// Output fragments that mean no credentials were found.
const MISSING_CREDENTIAL_MARKERS: &[&str] = &["Unable to locate credentials", "NoCredentialsError"];

/// Resolves the ambient credentials to an account identifier.
pub trait IdentityClient: Send + Sync {
    /// Get the account id of the current caller.
    ///
    /// # Errors
    ///
    /// Returns `MissingCredentials` when no credentials are discoverable,
    /// and another variant for every other failure.
    fn caller_account(&self) -> Result<String, IdentityError>;
}

/// Identity lookup through `aws sts get-caller-identity`.
///
/// The tool is located on the view's `PATH`, and the view's region is
/// passed to the child explicitly, so an exported region reaches the CLI
/// even when the view is not the process environment.
pub struct CliIdentityClient {
    tool: String,
    runner: Arc<dyn CommandRunner>,
    env: Arc<dyn EnvironmentView>,
    region_env_var: String,
}

impl CliIdentityClient {
    /// Create a client that runs `tool` through `runner`.
    pub fn new(
        tool: impl Into<String>,
        runner: Arc<dyn CommandRunner>,
        env: Arc<dyn EnvironmentView>,
        region_env_var: impl Into<String>,
    ) -> Self {
        Self {
            tool: tool.into(),
            runner,
            env,
            region_env_var: region_env_var.into(),
        }
    }
}

impl IdentityClient for CliIdentityClient {
    fn caller_account(&self) -> Result<String, IdentityError> {
        let program = find_executable(&self.tool, self.env.as_ref()).ok_or_else(|| {
            IdentityError::ClientUnavailable {
                message: format!("`{}` not found on PATH", self.tool),
            }
        })?;
        let program = program.to_string_lossy();

        let region = self.env.var(&self.region_env_var);
        let extra_env: Vec<(&str, &str)> = region
            .as_deref()
            .map(|region| (self.region_env_var.as_str(), region))
            .into_iter()
            .collect();

        let output = self
            .runner
            .run_with_env(
                &program,
                &[
                    "sts",
                    "get-caller-identity",
                    "--query",
                    "Account",
                    "--output",
                    "text",
                ],
                &extra_env,
            )
            .map_err(|e| match e {
                ContextError::CommandFailed { command, .. } => IdentityError::ClientUnavailable {
                    message: format!("could not run `{}`", command),
                },
                other => IdentityError::ClientUnavailable {
                    message: other.to_string(),
                },
            })?;

        account_from_output(&output)
    }
}

/// Identity client answering with a fixed reply, for tests.
#[derive(Debug)]
pub struct MockIdentity {
    reply: Result<String, IdentityError>,
    calls: AtomicUsize,
}

impl MockIdentity {
    /// Answer every lookup with `reply`.
    pub fn new(reply: Result<String, IdentityError>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
        }
    }

    /// Answer every lookup with `account`.
    pub fn account(account: &str) -> Self {
        Self::new(Ok(account.to_string()))
    }

    /// Number of lookups so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl IdentityClient for MockIdentity {
    fn caller_account(&self) -> Result<String, IdentityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }
}

/// Interpret the output of `aws sts get-caller-identity --query Account`.
pub fn account_from_output(output: &CommandOutput) -> Result<String, IdentityError> {
    let text = output.trimmed();

    if !output.success() {
        if MISSING_CREDENTIAL_MARKERS
            .iter()
            .any(|marker| text.contains(marker))
        {
            return Err(IdentityError::MissingCredentials);
        }
        return Err(IdentityError::Service {
            message: if text.is_empty() {
                format!("exited with {:?}", output.exit_code)
            } else {
                text.to_string()
            },
        });
    }

    if text.is_empty() {
        return Err(IdentityError::Service {
            message: "empty account id".to_string(),
        });
    }

    Ok(text.to_string())
}
