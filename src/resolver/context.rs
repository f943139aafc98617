//! The public entry point tying both resolvers together.

use std::sync::Arc;

use crate::config::{IdentityBackend, ResolverConfig};
use crate::environment::{EnvironmentView, ExecutionMode, ProcessEnvironment};
use crate::error::Result;
use crate::shell::{CommandRunner, SystemRunner};
use crate::ui::{TerminalUI, UserInterface};

use super::account::AccountResolver;
use super::cache::ResolvedValue;
use super::identity::{CliIdentityClient, IdentityClient};
use super::metadata::MetadataProbe;
use super::region::{RegionResolver, ResolvedRegion};
use super::sts::StsIdentityClient;

/// Resolves the ambient region and account, each at most once.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use cloudctx::environment::MapEnvironment;
/// use cloudctx::resolver::ContextResolver;
///
/// let env = MapEnvironment::new().with("AWS_REGION", "eu-west-2");
/// let resolver = ContextResolver::builder().env(Arc::new(env)).build();
/// assert_eq!(resolver.region(), "eu-west-2");
/// ```
pub struct ContextResolver {
    mode: Option<ExecutionMode>,
    test_env_var: String,
    env: Arc<dyn EnvironmentView>,
    region: RegionResolver,
    account: AccountResolver,
}

impl ContextResolver {
    /// Create a resolver over the real process environment.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start building a resolver with custom collaborators.
    pub fn builder() -> ContextResolverBuilder {
        ContextResolverBuilder::default()
    }

    /// The execution mode in effect for the next call.
    ///
    /// Detected from the environment on every call unless pinned by the
    /// builder.
    pub fn mode(&self) -> ExecutionMode {
        self.mode
            .unwrap_or_else(|| ExecutionMode::detect(self.env.as_ref(), &self.test_env_var))
    }

    /// The region. Never fails; worst case is the configured default.
    pub fn region(&self) -> &str {
        &self.resolved_region().name
    }

    /// The region together with the source that produced it.
    pub fn resolved_region(&self) -> &ResolvedRegion {
        self.region.resolve(self.mode())
    }

    /// The account id, or `None` if no credentials are available.
    ///
    /// # Errors
    ///
    /// Returns `ContextError::Identity` for any identity failure other than
    /// missing credentials.
    pub fn account(&self) -> Result<Option<&str>> {
        self.account.resolve(self.mode(), &self.region)
    }

    /// Cached region state, without resolving.
    pub fn region_state(&self) -> ResolvedValue<&ResolvedRegion> {
        self.region.state()
    }

    /// Cached account state, without resolving.
    pub fn account_state(&self) -> ResolvedValue<&String> {
        self.account.state()
    }
}

impl Default for ContextResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`ContextResolver`].
///
/// Every collaborator defaults to the real one: the process environment,
/// child processes, the identity client chosen by the configuration (STS
/// through the SDK unless `identity_backend` says otherwise), and the
/// terminal for output.
#[derive(Default)]
pub struct ContextResolverBuilder {
    config: Option<ResolverConfig>,
    mode: Option<ExecutionMode>,
    env: Option<Arc<dyn EnvironmentView>>,
    runner: Option<Arc<dyn CommandRunner>>,
    identity: Option<Box<dyn IdentityClient>>,
    ui: Option<Arc<dyn UserInterface>>,
}

impl ContextResolverBuilder {
    /// Use a custom configuration.
    pub fn config(mut self, config: ResolverConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Pin the execution mode instead of detecting it.
    pub fn mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Read and write variables through `env`.
    pub fn env(mut self, env: Arc<dyn EnvironmentView>) -> Self {
        self.env = Some(env);
        self
    }

    /// Run local commands through `runner`.
    pub fn runner(mut self, runner: Arc<dyn CommandRunner>) -> Self {
        self.runner = Some(runner);
        self
    }

    /// Look up the account through `identity`.
    pub fn identity(mut self, identity: Box<dyn IdentityClient>) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Send warnings and notices to `ui`.
    pub fn ui(mut self, ui: Arc<dyn UserInterface>) -> Self {
        self.ui = Some(ui);
        self
    }

    /// Build the resolver.
    pub fn build(self) -> ContextResolver {
        let config = self.config.unwrap_or_default();
        let env: Arc<dyn EnvironmentView> = match self.env {
            Some(env) => env,
            None => Arc::new(ProcessEnvironment::new()),
        };
        let runner: Arc<dyn CommandRunner> = match self.runner {
            Some(runner) => runner,
            None => Arc::new(SystemRunner::new()),
        };
        let ui: Arc<dyn UserInterface> = match self.ui {
            Some(ui) => ui,
            None => Arc::new(TerminalUI::new()),
        };
        let identity: Box<dyn IdentityClient> = match self.identity {
            Some(identity) => identity,
            None => default_identity(&config, &env, &runner),
        };

        let account = AccountResolver::new(
            config.region_env_var.clone(),
            config.test_account.clone(),
            Arc::clone(&env),
            identity,
            Arc::clone(&ui),
        );
        let test_env_var = config.test_env_var.clone();
        let metadata = MetadataProbe::from_config(&config);
        let region = RegionResolver::new(config, Arc::clone(&env), runner, metadata, ui);

        ContextResolver {
            mode: self.mode,
            test_env_var,
            env,
            region,
            account,
        }
    }
}

/// The identity client named by `config.identity_backend`.
fn default_identity(
    config: &ResolverConfig,
    env: &Arc<dyn EnvironmentView>,
    runner: &Arc<dyn CommandRunner>,
) -> Box<dyn IdentityClient> {
    match config.identity_backend {
        IdentityBackend::Sdk => {
            let mut client =
                StsIdentityClient::new(Arc::clone(env), config.region_env_var.clone());
            if let Some(url) = &config.identity_endpoint_url {
                client = client.with_endpoint_url(url.clone());
            }
            Box::new(client)
        }
        IdentityBackend::Cli => Box::new(CliIdentityClient::new(
            config.cli_tool.clone(),
            Arc::clone(runner),
            Arc::clone(env),
            config.region_env_var.clone(),
        )),
    }
}
