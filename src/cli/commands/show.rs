//! Show command implementation.
//!
//! The `cloudctx show` command prints the resolved region, the source that
//! produced it, and the account id.

use serde::Serialize;

use crate::cli::args::ShowArgs;
use crate::error::Result;
use crate::resolver::{ContextResolver, RegionSource};
use crate::ui::{should_use_colors, ContextTheme, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// Everything `show` reports.
#[derive(Debug, Serialize)]
pub struct ContextReport<'a> {
    /// Execution mode in effect ("normal" or "test").
    pub mode: String,

    /// Resolved region name.
    pub region: &'a str,

    /// Source that produced the region.
    pub region_source: RegionSource,

    /// Account id, or `None` without credentials.
    pub account: Option<&'a str>,
}

/// The show command implementation.
pub struct ShowCommand<'a> {
    resolver: &'a ContextResolver,
    args: ShowArgs,
    theme: ContextTheme,
}

impl<'a> ShowCommand<'a> {
    /// Create a new show command.
    pub fn new(resolver: &'a ContextResolver, args: ShowArgs) -> Self {
        let theme = if should_use_colors() {
            ContextTheme::new()
        } else {
            ContextTheme::plain()
        };
        Self::with_theme(resolver, args, theme)
    }

    /// Create a show command with an explicit theme.
    pub fn with_theme(resolver: &'a ContextResolver, args: ShowArgs, theme: ContextTheme) -> Self {
        Self {
            resolver,
            args,
            theme,
        }
    }

    fn report(&self) -> Result<ContextReport<'a>> {
        let resolver = self.resolver;
        let region = resolver.resolved_region();
        Ok(ContextReport {
            mode: resolver.mode().to_string(),
            region: &region.name,
            region_source: region.source,
            account: resolver.account()?,
        })
    }
}

impl Command for ShowCommand<'_> {
    fn execute(&self, ui: &dyn UserInterface) -> Result<CommandResult> {
        let report = self.report()?;

        if self.args.json {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| anyhow::anyhow!("Failed to serialize report: {}", e))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        ui.message(&self.theme.format_pair("Mode", &report.mode));
        ui.message(&self.theme.format_pair(
            "Region",
            &format!("{} ({})", report.region, report.region_source),
        ));
        ui.message(
            &self
                .theme
                .format_pair("Account", report.account.unwrap_or("(no credentials)")),
        );
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolverConfig;
    use crate::environment::MapEnvironment;
    use crate::error::IdentityError;
    use crate::resolver::MockIdentity;
    use crate::shell::MockRunner;
    use crate::ui::MockUI;
    use std::sync::Arc;

    fn resolver(env: MapEnvironment, identity: MockIdentity) -> ContextResolver {
        ContextResolver::builder()
            .config(ResolverConfig::default().with_metadata_url("http://127.0.0.1:1/az"))
            .env(Arc::new(env))
            .runner(Arc::new(MockRunner::replying("", 0)))
            .identity(Box::new(identity))
            .ui(Arc::new(MockUI::new()))
            .build()
    }

    #[test]
    fn text_report() {
        let resolver = resolver(
            MapEnvironment::new().with("AWS_REGION", "eu-west-1"),
            MockIdentity::account("777788889999"),
        );
        let ui = MockUI::new();

        ShowCommand::with_theme(&resolver, ShowArgs::default(), ContextTheme::plain())
            .execute(&ui)
            .unwrap();
        assert_eq!(
            ui.messages(),
            vec![
                "Mode: normal",
                "Region: eu-west-1 (environment override)",
                "Account: 777788889999",
            ]
        );
    }

    #[test]
    fn text_report_without_credentials() {
        let resolver = resolver(
            MapEnvironment::new(),
            MockIdentity::new(Err(IdentityError::MissingCredentials)),
        );
        let ui = MockUI::new();

        ShowCommand::with_theme(&resolver, ShowArgs::default(), ContextTheme::plain())
            .execute(&ui)
            .unwrap();
        assert_eq!(ui.messages()[1], "Region: us-east-1 (default)");
        assert_eq!(ui.messages()[2], "Account: (no credentials)");
    }

    #[test]
    fn json_report() {
        let resolver = resolver(
            MapEnvironment::new().with("TEST", "1"),
            MockIdentity::account("777788889999"),
        );
        let ui = MockUI::new();

        ShowCommand::new(&resolver, ShowArgs { json: true })
            .execute(&ui)
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        assert_eq!(value["mode"], "test");
        assert_eq!(value["region"], "us-east-1");
        assert_eq!(value["region_source"], "test_mode");
        assert_eq!(value["account"], "123456789");
    }
}
