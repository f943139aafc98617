//! Region resolution.
//!
//! Resolves the region using the precedence chain:
//! 1. Explicit override variable (`AWS_REGION`)
//! 2. The AWS CLI's configured region (`aws configure get region`)
//! 3. The instance metadata availability zone
//! 4. Fallback to "us-east-1"
//!
//! The first source producing a non-empty value wins and later sources are
//! never consulted. In test mode the chain is skipped entirely.

use std::sync::Arc;

use crate::config::ResolverConfig;
use crate::environment::{EnvironmentView, ExecutionMode};
use crate::shell::{find_executable, CommandRunner};
use crate::ui::{hints, UserInterface};

use super::cache::{CacheCell, ResolvedValue};
use super::cli_probe::classify_cli_failure;
use super::metadata::MetadataProbe;

/// How the region was determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionSource {
    /// Fixed constant for test mode.
    TestMode,
    /// Explicit override variable.
    Override,
    /// The CLI tool's local configuration.
    CliConfig,
    /// The instance metadata endpoint.
    InstanceMetadata,
    /// Nothing else produced a value.
    Fallback,
}

impl std::fmt::Display for RegionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TestMode => write!(f, "test mode"),
            Self::Override => write!(f, "environment override"),
            Self::CliConfig => write!(f, "cli configuration"),
            Self::InstanceMetadata => write!(f, "instance metadata"),
            Self::Fallback => write!(f, "default"),
        }
    }
}

/// Probing sources in precedence order.
pub const REGION_CHAIN: [RegionSource; 3] = [
    RegionSource::Override,
    RegionSource::CliConfig,
    RegionSource::InstanceMetadata,
];

/// A resolved region with how it was determined.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ResolvedRegion {
    /// The region name (e.g., "us-east-1").
    pub name: String,
    /// How this region was determined.
    pub source: RegionSource,
}

impl ResolvedRegion {
    fn new(name: impl Into<String>, source: RegionSource) -> Self {
        Self {
            name: name.into(),
            source,
        }
    }
}

/// Walks the region precedence chain once and caches the result.
pub struct RegionResolver {
    config: ResolverConfig,
    env: Arc<dyn EnvironmentView>,
    runner: Arc<dyn CommandRunner>,
    metadata: MetadataProbe,
    ui: Arc<dyn UserInterface>,
    test_region: ResolvedRegion,
    cache: CacheCell<ResolvedRegion>,
}

impl RegionResolver {
    /// Create a resolver over the given collaborators.
    pub fn new(
        config: ResolverConfig,
        env: Arc<dyn EnvironmentView>,
        runner: Arc<dyn CommandRunner>,
        metadata: MetadataProbe,
        ui: Arc<dyn UserInterface>,
    ) -> Self {
        let test_region = ResolvedRegion::new(config.test_region.clone(), RegionSource::TestMode);
        Self {
            config,
            env,
            runner,
            metadata,
            ui,
            test_region,
            cache: CacheCell::new(),
        }
    }

    /// Resolve the region, walking the chain on first use.
    pub fn resolve(&self, mode: ExecutionMode) -> &ResolvedRegion {
        if mode.is_test() {
            return &self.test_region;
        }
        self.cache.get_or_init(|| self.walk_chain())
    }

    /// Cache state, without resolving.
    pub fn state(&self) -> ResolvedValue<&ResolvedRegion> {
        self.cache.state()
    }

    fn walk_chain(&self) -> ResolvedRegion {
        for source in REGION_CHAIN {
            if let Some(name) = self.try_source(source) {
                tracing::debug!("Region {} from {}", name, source);
                return ResolvedRegion::new(name, source);
            }
            tracing::debug!("No region from {}", source);
        }

        tracing::debug!("Falling back to region {}", self.config.default_region);
        ResolvedRegion::new(self.config.default_region.clone(), RegionSource::Fallback)
    }

    fn try_source(&self, source: RegionSource) -> Option<String> {
        match source {
            RegionSource::Override => self.from_override(),
            RegionSource::CliConfig => self.from_cli_config(),
            RegionSource::InstanceMetadata => self.metadata.region(),
            RegionSource::TestMode | RegionSource::Fallback => None,
        }
    }

    fn from_override(&self) -> Option<String> {
        self.env.non_empty_var(&self.config.region_env_var)
    }

    fn from_cli_config(&self) -> Option<String> {
        let tool = &self.config.cli_tool;
        let Some(path) = find_executable(tool, self.env.as_ref()) else {
            tracing::debug!("`{}` not found on PATH", tool);
            return None;
        };

        let output = match self.runner.run(
            &path.to_string_lossy(),
            &["configure", "get", "region"],
        ) {
            Ok(output) => output,
            Err(e) => {
                tracing::debug!("CLI probe could not run: {}", e);
                return None;
            }
        };

        let text = output.trimmed();
        if !output.success() {
            self.ui.warning(&classify_cli_failure(text).warning());
            self.ui
                .hint(&hints::region_remedy(&self.config.region_env_var));
            return None;
        }

        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::MapEnvironment;
    use crate::shell::MockRunner;
    use crate::ui::MockUI;
    use httpmock::prelude::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const UNREACHABLE: &str = "http://127.0.0.1:1/latest/meta-data/placement/availability-zone";

    /// Create a directory holding an executable named `aws`.
    fn fake_cli_dir() -> TempDir {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("aws");
        fs::write(&path, "#!/bin/sh\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        }
        temp
    }

    fn env_with_path(dir: &Path) -> MapEnvironment {
        MapEnvironment::new().with("PATH", &dir.to_string_lossy())
    }

    fn resolver(
        env: MapEnvironment,
        runner: Arc<MockRunner>,
        metadata_url: &str,
        ui: Arc<MockUI>,
    ) -> RegionResolver {
        let config = ResolverConfig::default().with_metadata_url(metadata_url);
        let metadata = MetadataProbe::from_config(&config);
        RegionResolver::new(config, Arc::new(env), runner, metadata, ui)
    }

    #[test]
    fn test_mode_skips_every_source() {
        let runner = Arc::new(MockRunner::replying("eu-west-1", 0));
        let env = MapEnvironment::new().with("AWS_REGION", "ap-south-1");
        let region = resolver(env, runner.clone(), UNREACHABLE, Arc::new(MockUI::new()));

        let resolved = region.resolve(ExecutionMode::Test);
        assert_eq!(resolved.name, "us-east-1");
        assert_eq!(resolved.source, RegionSource::TestMode);
        assert_eq!(runner.call_count(), 0);
        assert_eq!(region.state(), ResolvedValue::Unresolved);
    }

    #[test]
    fn override_takes_highest_priority() {
        let cli = fake_cli_dir();
        let runner = Arc::new(MockRunner::replying("us-west-2", 0));
        let env = env_with_path(cli.path()).with("AWS_REGION", "eu-west-2");
        let region = resolver(env, runner.clone(), UNREACHABLE, Arc::new(MockUI::new()));

        let resolved = region.resolve(ExecutionMode::Normal);
        assert_eq!(resolved.name, "eu-west-2");
        assert_eq!(resolved.source, RegionSource::Override);
        assert_eq!(runner.call_count(), 0);
    }

    #[test]
    fn blank_override_is_ignored() {
        let runner = Arc::new(MockRunner::replying("", 0));
        let env = MapEnvironment::new().with("AWS_REGION", "  ");
        let region = resolver(env, runner, UNREACHABLE, Arc::new(MockUI::new()));

        assert_eq!(region.resolve(ExecutionMode::Normal).source, RegionSource::Fallback);
    }

    #[test]
    fn cli_config_used_when_no_override() {
        let cli = fake_cli_dir();
        let runner = Arc::new(MockRunner::replying("us-west-2\n", 0));
        let region = resolver(
            env_with_path(cli.path()),
            runner.clone(),
            UNREACHABLE,
            Arc::new(MockUI::new()),
        );

        let resolved = region.resolve(ExecutionMode::Normal);
        assert_eq!(resolved.name, "us-west-2");
        assert_eq!(resolved.source, RegionSource::CliConfig);

        let expected = format!("{} configure get region", cli.path().join("aws").display());
        assert_eq!(runner.calls(), vec![expected]);
    }

    #[test]
    fn cli_exception_emits_condensed_warning_and_hint() {
        let cli = fake_cli_dir();
        let runner = Arc::new(MockRunner::replying(
            "Traceback (most recent call last):\n  File \"aws\"\nbotocore.exceptions.ProfileNotFound: The config profile (dev) could not be found\n",
            255,
        ));
        let ui = Arc::new(MockUI::new());
        let region = resolver(env_with_path(cli.path()), runner, UNREACHABLE, ui.clone());

        let resolved = region.resolve(ExecutionMode::Normal);
        assert_eq!(resolved.source, RegionSource::Fallback);
        assert_eq!(
            ui.warnings(),
            vec!["WARN: botocore.exceptions.ProfileNotFound: The config profile (dev) could not be found"]
        );
        assert_eq!(ui.hints().len(), 1);
        assert!(ui.hints()[0].contains("AWS_REGION"));
    }

    #[test]
    fn cli_plain_failure_emits_full_text() {
        let cli = fake_cli_dir();
        let runner = Arc::new(MockRunner::replying("something odd\nhappened\n", 1));
        let ui = Arc::new(MockUI::new());
        let region = resolver(env_with_path(cli.path()), runner, UNREACHABLE, ui.clone());

        region.resolve(ExecutionMode::Normal);
        assert_eq!(ui.warnings(), vec!["something odd\nhappened"]);
        assert_eq!(ui.hints().len(), 1);
    }

    #[test]
    fn cli_empty_success_falls_through_quietly() {
        let cli = fake_cli_dir();
        let runner = Arc::new(MockRunner::replying("\n", 0));
        let ui = Arc::new(MockUI::new());
        let region = resolver(env_with_path(cli.path()), runner, UNREACHABLE, ui.clone());

        assert_eq!(region.resolve(ExecutionMode::Normal).source, RegionSource::Fallback);
        assert!(ui.is_quiet());
    }

    #[test]
    fn cli_spawn_failure_falls_through_quietly() {
        let cli = fake_cli_dir();
        let runner = Arc::new(MockRunner::failing_to_spawn());
        let ui = Arc::new(MockUI::new());
        let region = resolver(env_with_path(cli.path()), runner, UNREACHABLE, ui.clone());

        assert_eq!(region.resolve(ExecutionMode::Normal).source, RegionSource::Fallback);
        assert!(ui.is_quiet());
    }

    #[test]
    fn cli_not_on_path_is_not_run() {
        let empty = TempDir::new().unwrap();
        let runner = Arc::new(MockRunner::replying("us-west-2", 0));
        let region = resolver(
            env_with_path(empty.path()),
            runner.clone(),
            UNREACHABLE,
            Arc::new(MockUI::new()),
        );

        assert_eq!(region.resolve(ExecutionMode::Normal).source, RegionSource::Fallback);
        assert_eq!(runner.call_count(), 0);
    }

    #[test]
    fn metadata_used_after_cli() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/az");
            then.status(200).body("us-east-1a");
        });
        let cli = fake_cli_dir();
        let runner = Arc::new(MockRunner::replying("", 0));
        let ui = Arc::new(MockUI::new());
        let region = resolver(env_with_path(cli.path()), runner, &server.url("/az"), ui.clone());

        let resolved = region.resolve(ExecutionMode::Normal);
        assert_eq!(resolved.name, "us-east-1");
        assert_eq!(resolved.source, RegionSource::InstanceMetadata);
    }

    #[test]
    fn metadata_not_fetched_when_cli_answers() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/az");
            then.status(200).body("sa-east-1a");
        });
        let cli = fake_cli_dir();
        let runner = Arc::new(MockRunner::replying("ca-central-1", 0));
        let region = resolver(
            env_with_path(cli.path()),
            runner,
            &server.url("/az"),
            Arc::new(MockUI::new()),
        );

        assert_eq!(region.resolve(ExecutionMode::Normal).name, "ca-central-1");
        mock.assert_calls(0);
    }

    #[test]
    fn metadata_failure_is_silent() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/az");
            then.status(500);
        });
        let ui = Arc::new(MockUI::new());
        let region = resolver(
            MapEnvironment::new(),
            Arc::new(MockRunner::replying("", 0)),
            &server.url("/az"),
            ui.clone(),
        );

        let resolved = region.resolve(ExecutionMode::Normal);
        assert_eq!(resolved.name, "us-east-1");
        assert_eq!(resolved.source, RegionSource::Fallback);
        assert!(ui.is_quiet());
    }

    #[test]
    fn chain_runs_once() {
        let cli = fake_cli_dir();
        let runner = Arc::new(MockRunner::replying("us-west-1", 0));
        let region = resolver(
            env_with_path(cli.path()),
            runner.clone(),
            UNREACHABLE,
            Arc::new(MockUI::new()),
        );

        let first = region.resolve(ExecutionMode::Normal);
        let second = region.resolve(ExecutionMode::Normal);
        assert!(std::ptr::eq(first, second));
        assert_eq!(runner.call_count(), 1);
        assert!(region.state().is_resolved());
    }

    #[test]
    fn custom_cli_tool_is_probed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("aws2");
        fs::write(&path, "#!/bin/sh\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        }
        let runner = Arc::new(MockRunner::replying("il-central-1", 0));
        let config = ResolverConfig::default()
            .with_metadata_url(UNREACHABLE)
            .with_cli_tool("aws2");
        let metadata = MetadataProbe::from_config(&config);
        let region = RegionResolver::new(
            config,
            Arc::new(env_with_path(temp.path())),
            runner.clone(),
            metadata,
            Arc::new(MockUI::new()),
        );

        assert_eq!(region.resolve(ExecutionMode::Normal).name, "il-central-1");
        assert!(runner.calls()[0].contains("aws2 configure get region"));
    }

    #[test]
    fn source_display() {
        assert_eq!(RegionSource::Override.to_string(), "environment override");
        assert_eq!(RegionSource::Fallback.to_string(), "default");
    }
}
