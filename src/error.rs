//! Error types for cloudctx operations.
//!
//! This module defines [`ContextError`], the primary error type surfaced by
//! the resolvers and the CLI, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Region resolution never returns an error; every probe failure is
//!   recovered inside the chain
//! - Account resolution recovers [`IdentityError::MissingCredentials`] and
//!   surfaces every other identity failure as [`ContextError::Identity`]
//! - Use `anyhow::Error` (via `ContextError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for cloudctx operations.
#[derive(Debug, Error)]
pub enum ContextError {
    /// Resolver configuration file not found.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse the resolver configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// A command could not be started or did not report a status.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// The identity service failed in a way the account lookup does not recover.
    #[error("Identity lookup failed: {0}")]
    Identity(#[from] IdentityError),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Failures reported by an [`IdentityClient`](crate::resolver::IdentityClient).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// No credentials could be discovered for the current process.
    #[error("no credentials could be located")]
    MissingCredentials,

    /// The identity client itself could not be started.
    #[error("identity client unavailable: {message}")]
    ClientUnavailable { message: String },

    /// The identity service answered with an error.
    #[error("identity service error: {message}")]
    Service { message: String },
}

/// Result type alias for cloudctx operations.
pub type Result<T> = std::result::Result<T, ContextError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_displays_path() {
        let err = ContextError::ConfigNotFound {
            path: PathBuf::from("/etc/cloudctx.yml"),
        };
        assert!(err.to_string().contains("/etc/cloudctx.yml"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = ContextError::ConfigParseError {
            path: PathBuf::from("/config.yml"),
            message: "unknown field `regoin`".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/config.yml"));
        assert!(msg.contains("unknown field"));
    }

    #[test]
    fn command_failed_displays_command_and_code() {
        let err = ContextError::CommandFailed {
            command: "aws configure get region".into(),
            code: None,
        };
        let msg = err.to_string();
        assert!(msg.contains("aws configure get region"));
        assert!(msg.contains("None"));
    }

    #[test]
    fn identity_error_converts_into_context_error() {
        let err: ContextError = IdentityError::Service {
            message: "ExpiredToken".into(),
        }
        .into();
        assert!(matches!(err, ContextError::Identity(_)));
        assert!(err.to_string().contains("ExpiredToken"));
    }

    #[test]
    fn missing_credentials_displays_reason() {
        let err = IdentityError::MissingCredentials;
        assert!(err.to_string().contains("credentials"));
    }

    #[test]
    fn client_unavailable_displays_message() {
        let err = IdentityError::ClientUnavailable {
            message: "aws: not found".into(),
        };
        assert!(err.to_string().contains("aws: not found"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: ContextError = io_err.into();
        assert!(matches!(err, ContextError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(IdentityError::MissingCredentials.into())
        }
        assert!(returns_error().is_err());
    }
}
