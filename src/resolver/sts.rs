//! Identity lookup through the AWS SDK.
//!
//! [`StsIdentityClient`] loads the SDK's default configuration, resolves
//! credentials through the standard provider chain, and calls STS
//! `GetCallerIdentity`. The SDK is async; each lookup drives it on a
//! short-lived current-thread runtime so callers stay synchronous.

use std::sync::Arc;

use aws_credential_types::provider::error::CredentialsError;
use aws_credential_types::provider::ProvideCredentials;
use aws_credential_types::Credentials;
use aws_sdk_sts::config::Region;
use aws_sdk_sts::error::DisplayErrorContext;
use tracing::debug;

use crate::environment::EnvironmentView;
use crate::error::IdentityError;

use super::identity::IdentityClient;

/// Where the client gets credentials from.
#[derive(Debug, Clone)]
enum CredentialSource {
    /// The SDK's default provider chain.
    DefaultChain,
    /// A fixed set of keys.
    Static(Credentials),
    /// No provider at all.
    Disabled,
}

/// Identity lookup through STS `GetCallerIdentity`.
///
/// The region is read from the environment view under `region_env_var`,
/// so the value the account resolver exports is the one the request is
/// signed for. Credentials come from the SDK's provider chain unless set
/// explicitly.
pub struct StsIdentityClient {
    env: Arc<dyn EnvironmentView>,
    region_env_var: String,
    endpoint_url: Option<String>,
    credentials: CredentialSource,
}

impl StsIdentityClient {
    /// Create a client reading the region from `region_env_var` in `env`.
    pub fn new(env: Arc<dyn EnvironmentView>, region_env_var: impl Into<String>) -> Self {
        Self {
            env,
            region_env_var: region_env_var.into(),
            endpoint_url: None,
            credentials: CredentialSource::DefaultChain,
        }
    }

    /// Send requests to `url` instead of the regional STS endpoint.
    pub fn with_endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.endpoint_url = Some(url.into());
        self
    }

    /// Sign with fixed `credentials` instead of the provider chain.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = CredentialSource::Static(credentials);
        self
    }

    /// Resolve without any credentials provider.
    pub fn without_credentials(mut self) -> Self {
        self.credentials = CredentialSource::Disabled;
        self
    }

    async fn lookup(&self) -> Result<String, IdentityError> {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = self.env.var(&self.region_env_var) {
            loader = loader.region(Region::new(region));
        }
        loader = match &self.credentials {
            CredentialSource::DefaultChain => loader,
            CredentialSource::Static(credentials) => {
                loader.credentials_provider(credentials.clone())
            }
            CredentialSource::Disabled => loader.no_credentials(),
        };
        let config = loader.load().await;

        let provider = config
            .credentials_provider()
            .ok_or(IdentityError::MissingCredentials)?;
        let credentials = provider.provide_credentials().await.map_err(|e| match e {
            CredentialsError::CredentialsNotLoaded(_) => IdentityError::MissingCredentials,
            other => IdentityError::Service {
                message: DisplayErrorContext(&other).to_string(),
            },
        })?;

        let mut client_config =
            aws_sdk_sts::config::Builder::from(&config).credentials_provider(credentials);
        if let Some(url) = &self.endpoint_url {
            client_config = client_config.endpoint_url(url);
        }
        let client = aws_sdk_sts::Client::from_conf(client_config.build());

        let output = client
            .get_caller_identity()
            .send()
            .await
            .map_err(|e| IdentityError::Service {
                message: DisplayErrorContext(&e).to_string(),
            })?;

        match output.account() {
            Some(account) if !account.trim().is_empty() => Ok(account.trim().to_string()),
            _ => Err(IdentityError::Service {
                message: "empty account id".to_string(),
            }),
        }
    }
}

impl IdentityClient for StsIdentityClient {
    fn caller_account(&self) -> Result<String, IdentityError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| IdentityError::ClientUnavailable {
                message: format!("could not start async runtime: {}", e),
            })?;

        debug!(endpoint = ?self.endpoint_url, "Calling sts:GetCallerIdentity");
        runtime.block_on(self.lookup())
    }
}
