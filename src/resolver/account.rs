//! Account resolution.
//!
//! Looks up the caller's account through the identity client, once. The
//! identity client reads the region from the environment, so the resolved
//! region is exported first if the override variable is unset.

use std::sync::Arc;

use crate::environment::{EnvironmentView, ExecutionMode};
use crate::error::{IdentityError, Result};
use crate::ui::{hints, UserInterface};

use super::cache::{CacheCell, ResolvedValue};
use super::identity::IdentityClient;
use super::region::RegionResolver;

/// Looks up the account id once and caches the result.
pub struct AccountResolver {
    region_env_var: String,
    test_account: String,
    env: Arc<dyn EnvironmentView>,
    identity: Box<dyn IdentityClient>,
    ui: Arc<dyn UserInterface>,
    cache: CacheCell<Option<String>>,
}

impl AccountResolver {
    /// Create a resolver over the given collaborators.
    pub fn new(
        region_env_var: impl Into<String>,
        test_account: impl Into<String>,
        env: Arc<dyn EnvironmentView>,
        identity: Box<dyn IdentityClient>,
        ui: Arc<dyn UserInterface>,
    ) -> Self {
        Self {
            region_env_var: region_env_var.into(),
            test_account: test_account.into(),
            env,
            identity,
            ui,
            cache: CacheCell::new(),
        }
    }

    /// Resolve the account id.
    ///
    /// Returns `Ok(None)` when no credentials are available. Any other
    /// identity failure is returned as an error and not cached.
    pub fn resolve(&self, mode: ExecutionMode, region: &RegionResolver) -> Result<Option<&str>> {
        if mode.is_test() {
            return Ok(Some(self.test_account.as_str()));
        }

        let account = self.cache.get_or_try_init(|| self.lookup(mode, region))?;
        Ok(account.as_deref())
    }

    /// Cache state, without resolving.
    pub fn state(&self) -> ResolvedValue<&String> {
        self.cache.state().flatten()
    }

    fn lookup(&self, mode: ExecutionMode, region: &RegionResolver) -> Result<Option<String>> {
        self.export_region(mode, region);

        match self.identity.caller_account() {
            Ok(account) => {
                tracing::debug!("Resolved account {}", account);
                Ok(Some(account))
            }
            Err(IdentityError::MissingCredentials) => {
                self.ui.info(hints::missing_credentials());
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn export_region(&self, mode: ExecutionMode, region: &RegionResolver) {
        if self.env.var(&self.region_env_var).is_some() {
            return;
        }

        let name = &region.resolve(mode).name;
        if self.env.set_var_if_unset(&self.region_env_var, name) {
            tracing::debug!("Exported {}={}", self.region_env_var, name);
        }
    }
}
