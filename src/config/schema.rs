//! Configuration schema for the context resolvers.
//!
//! Every field has a default, so an empty file (or no file at all) yields
//! the stock AWS behavior.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable naming the explicit region override.
pub const REGION_ENV_VAR: &str = "AWS_REGION";

/// Environment variable whose presence switches the process into test mode.
pub const TEST_ENV_VAR: &str = "TEST";

/// CLI tool probed for a locally configured region.
pub const CLI_TOOL: &str = "aws";

/// Instance metadata path that reports the availability zone.
pub const METADATA_URL: &str =
    "http://169.254.169.254/latest/meta-data/placement/availability-zone";

/// Connect timeout for the metadata probe.
///
/// Numerically larger than [`METADATA_MAX_TIME`], so the overall limit is
/// always the one that fires first. Both values are kept as found; revisit
/// the pairing before relying on the connect phase being bounded separately.
pub const METADATA_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Overall time limit for the metadata probe.
pub const METADATA_MAX_TIME: Duration = Duration::from_secs(3);

/// Region used when every source comes up empty, and in test mode.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Account reported in test mode.
pub const TEST_ACCOUNT: &str = "123456789";

/// Which client answers the caller identity lookup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityBackend {
    /// STS through the AWS SDK.
    #[default]
    Sdk,
    /// `aws sts get-caller-identity` through the CLI tool.
    Cli,
}

/// Resolver configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    /// Environment variable holding the explicit region override.
    pub region_env_var: String,

    /// Environment variable that enables test mode when present.
    pub test_env_var: String,

    /// Name of the CLI tool asked for the configured region.
    pub cli_tool: String,

    /// URL returning the instance's availability zone.
    pub metadata_url: String,

    /// Metadata probe connect timeout, in seconds.
    pub connect_timeout_secs: u64,

    /// Metadata probe overall timeout, in seconds.
    pub max_time_secs: u64,

    /// Region returned when no source produces one.
    pub default_region: String,

    /// Region returned in test mode.
    pub test_region: String,

    /// Account returned in test mode.
    pub test_account: String,

    /// Client used for the account lookup.
    pub identity_backend: IdentityBackend,

    /// STS endpoint override for the SDK client.
    pub identity_endpoint_url: Option<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            region_env_var: REGION_ENV_VAR.to_string(),
            test_env_var: TEST_ENV_VAR.to_string(),
            cli_tool: CLI_TOOL.to_string(),
            metadata_url: METADATA_URL.to_string(),
            connect_timeout_secs: METADATA_CONNECT_TIMEOUT.as_secs(),
            max_time_secs: METADATA_MAX_TIME.as_secs(),
            default_region: DEFAULT_REGION.to_string(),
            test_region: DEFAULT_REGION.to_string(),
            test_account: TEST_ACCOUNT.to_string(),
            identity_backend: IdentityBackend::default(),
            identity_endpoint_url: None,
        }
    }
}

impl ResolverConfig {
    /// Metadata probe connect timeout.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Metadata probe overall timeout.
    pub fn max_time(&self) -> Duration {
        Duration::from_secs(self.max_time_secs)
    }

    /// Point the metadata probe at a different URL.
    pub fn with_metadata_url(mut self, url: impl Into<String>) -> Self {
        self.metadata_url = url.into();
        self
    }

    /// Use a different CLI tool name for the local probe.
    pub fn with_cli_tool(mut self, tool: impl Into<String>) -> Self {
        self.cli_tool = tool.into();
        self
    }

    /// Choose the client used for the account lookup.
    pub fn with_identity_backend(mut self, backend: IdentityBackend) -> Self {
        self.identity_backend = backend;
        self
    }
}
