//! cloudctx - Resolve the ambient AWS region and account.
//!
//! Tools that talk to AWS (or to local emulations of it) need to know which
//! region to target and which account the ambient credentials belong to.
//! cloudctx answers both questions once per process and caches the result.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Resolver configuration loading
//! - [`environment`] - Environment variable access and execution mode
//! - [`error`] - Error types and result aliases
//! - [`resolver`] - Region and account resolution
//! - [`shell`] - Local command execution and PATH lookup
//! - [`ui`] - Warnings, hints, and terminal output
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use cloudctx::environment::MapEnvironment;
//! use cloudctx::resolver::{ContextResolver, RegionSource};
//!
//! let env = MapEnvironment::new().with("TEST", "1");
//! let resolver = ContextResolver::builder().env(Arc::new(env)).build();
//!
//! assert_eq!(resolver.region(), "us-east-1");
//! assert_eq!(resolver.resolved_region().source, RegionSource::TestMode);
//! assert_eq!(resolver.account().unwrap(), Some("123456789"));
//! ```

use std::sync::OnceLock;

pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod resolver;
pub mod shell;
pub mod ui;

pub use error::{ContextError, IdentityError, Result};
pub use resolver::ContextResolver;

static GLOBAL: OnceLock<ContextResolver> = OnceLock::new();

/// The process-wide resolver over the real environment.
pub fn global() -> &'static ContextResolver {
    GLOBAL.get_or_init(ContextResolver::new)
}

/// The process-wide region. See [`ContextResolver::region`].
pub fn region() -> &'static str {
    global().region()
}

/// The process-wide account id. See [`ContextResolver::account`].
///
/// # Errors
///
/// Returns `ContextError::Identity` for any identity failure other than
/// missing credentials.
pub fn account() -> Result<Option<&'static str>> {
    global().account()
}
