//! Region and account resolution.
//!
//! [`ContextResolver`] is the entry point. It owns a [`RegionResolver`],
//! which walks the region precedence chain, and an [`AccountResolver`],
//! which asks an [`IdentityClient`] for the caller's account. Each result
//! is cached in a write-once [`CacheCell`].

pub mod account;
pub mod cache;
pub mod cli_probe;
pub mod context;
pub mod identity;
pub mod metadata;
pub mod region;
pub mod sts;

pub use account::AccountResolver;
pub use cache::{CacheCell, ResolvedValue};
pub use cli_probe::{classify_cli_failure, CliFailure, SDK_EXCEPTION_MARKER};
pub use context::{ContextResolver, ContextResolverBuilder};
pub use identity::{account_from_output, CliIdentityClient, IdentityClient, MockIdentity};
pub use metadata::{region_from_availability_zone, MetadataProbe};
pub use region::{RegionResolver, RegionSource, ResolvedRegion, REGION_CHAIN};
pub use sts::StsIdentityClient;
