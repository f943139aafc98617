//! Resolver configuration.
//!
//! - Schema and built-in constants in [`schema`]
//! - File loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use cloudctx::config::{parse_config, ResolverConfig};
//! use std::path::Path;
//!
//! let config = parse_config("default_region: eu-west-1", Path::new("cloudctx.yml")).unwrap();
//! assert_eq!(config.default_region, "eu-west-1");
//! assert_eq!(config.cli_tool, ResolverConfig::default().cli_tool);
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_config_file, parse_config};
pub use schema::{
    IdentityBackend, ResolverConfig, CLI_TOOL, DEFAULT_REGION, METADATA_CONNECT_TIMEOUT,
    METADATA_MAX_TIME, METADATA_URL, REGION_ENV_VAR, TEST_ACCOUNT, TEST_ENV_VAR,
};
