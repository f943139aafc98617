//! Classification of CLI probe failures.
//!
//! When the CLI exits non-zero its output is usually either a Python
//! traceback ending in a botocore exception, or a short plain message.
//! Tracebacks are condensed to the exception line.

/// Text identifying a vendor SDK exception line.
pub const SDK_EXCEPTION_MARKER: &str = "botocore.exceptions";

/// A failed CLI probe, classified by its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliFailure {
    /// The output contained an SDK exception; holds the first such line.
    SdkException(String),
    /// Anything else; holds the full output.
    Raw(String),
}

impl CliFailure {
    /// The warning line to show the user.
    pub fn warning(&self) -> String {
        match self {
            Self::SdkException(line) => format!("WARN: {}", line),
            Self::Raw(text) => text.clone(),
        }
    }
}

/// Classify the (trimmed) output of a failed CLI probe.
///
/// # Example
///
/// ```
/// use cloudctx::resolver::{classify_cli_failure, CliFailure};
///
/// let output = "Traceback (most recent call last):\n\
///               botocore.exceptions.ProfileNotFound: The config profile (dev) could not be found";
/// assert_eq!(
///     classify_cli_failure(output),
///     CliFailure::SdkException(
///         "botocore.exceptions.ProfileNotFound: The config profile (dev) could not be found".to_string()
///     )
/// );
/// ```
pub fn classify_cli_failure(output: &str) -> CliFailure {
    output
        .lines()
        .find(|line| line.contains(SDK_EXCEPTION_MARKER))
        .map(|line| CliFailure::SdkException(line.to_string()))
        .unwrap_or_else(|| CliFailure::Raw(output.to_string()))
}
